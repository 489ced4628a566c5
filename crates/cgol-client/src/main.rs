//! Command-line client: runs words through the simulation service and reports the best.

mod batch;
mod client;
mod telemetry;

use anyhow::{bail, Result};
use batch::WordResult;
use cgol_core::ClientConfig;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(author, version, about = "Run words through the CGoL service and report the best score", long_about = None)]
struct ClientArgs {
    /// Service base URL (defaults to CGOL_SERVER_URL or http://127.0.0.1:8000)
    #[arg(long = "server")]
    server_url: Option<String>,
    /// Number of random lowercase words to add to the batch
    #[arg(long, default_value_t = 0)]
    random: usize,
    /// Seed for the random word generator
    #[arg(long)]
    seed: Option<u64>,
    /// Words to simulate
    words: Vec<String>,
}

impl ClientArgs {
    fn validate(&self) -> Result<()> {
        if self.words.is_empty() && self.random == 0 {
            bail!("no words given: pass WORD... or --random N");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let args = ClientArgs::parse();
    args.validate()?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.server_url {
        config.server_url = url;
    }

    let mut words = args.words;
    if args.random > 0 {
        let mut rng = match args.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        words.extend(batch::random_words(&mut rng, args.random));
    }

    let client = client::GameClient::new(config)?;
    info!("Server URL: {}", client.config().server_url);

    let mut results = Vec::with_capacity(words.len());
    for word in words {
        let outcome = match client.play(&word).await {
            Ok(outcome) => {
                println!(
                    "{word}: {} generations, score {}, {}",
                    outcome.num_generations, outcome.score, outcome.stop_reason
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!("Request for {:?} failed: {:#}", word, e);
                println!("{word}: error: {e:#}");
                Err(format!("{e:#}"))
            }
        };
        results.push(WordResult { word, outcome });
    }

    match batch::best_result(&results) {
        Some((word, outcome)) => println!("best: {word} (score {})", outcome.score),
        None => bail!("no word produced a result"),
    }

    Ok(())
}
