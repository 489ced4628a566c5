//! Word batches: random word generation and picking the best result.

use cgol_core::GameOutcome;
use rand::Rng;

/// Outcome of one word in a batch
#[derive(Debug)]
pub struct WordResult {
    pub word: String,
    pub outcome: Result<GameOutcome, String>,
}

/// Random lowercase words of 3 to 10 letters
pub fn random_words<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(3..=10);
            (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
        })
        .collect()
}

/// Highest-scoring successful result; the earliest wins ties
pub fn best_result(results: &[WordResult]) -> Option<(&str, &GameOutcome)> {
    let mut best: Option<(&str, &GameOutcome)> = None;
    for result in results {
        if let Ok(outcome) = &result.outcome {
            if best.map_or(true, |(_, current)| outcome.score > current.score) {
                best = Some((result.word.as_str(), outcome));
            }
        }
    }
    best
}
