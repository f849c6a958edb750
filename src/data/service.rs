//! Synthetic dataset generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::domain::{
    Dataset, Difficulty, LearningStyle, Subject, TimeAvailable, TrainingExample,
};
use super::policy;

/// Rows generated when no size is configured.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Generate `n` labelled examples from a fixed seed.
pub fn generate(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let examples = generate_with(n, &mut rng);

    debug!(samples = examples.len(), seed, "generated synthetic dataset");
    Dataset { seed, examples }
}

/// Generate `n` examples from an existing random source.
///
/// Draw order per row is style, subject, time, difficulty, then the label.
pub fn generate_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<TrainingExample> {
    (0..n)
        .map(|_| {
            let learning_style = pick(LearningStyle::ALL, rng);
            let subject = pick(Subject::ALL, rng);
            let time_available = pick(TimeAvailable::ALL, rng);
            let difficulty = pick(Difficulty::ALL, rng);
            let method = policy::label(learning_style, subject, time_available, difficulty, rng);
            TrainingExample {
                learning_style,
                subject,
                time_available,
                difficulty,
                method,
            }
        })
        .collect()
}

fn pick<T: Copy, R: Rng + ?Sized>(values: &[T], rng: &mut R) -> T {
    *values.choose(rng).unwrap_or(&values[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_number_of_rows() {
        assert_eq!(generate(DEFAULT_SAMPLES, 42).len(), 1000);
        assert!(generate(0, 42).is_empty());
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate(500, 42);
        let b = generate(500, 42);
        assert_eq!(a.examples, b.examples);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn different_seed_different_dataset() {
        assert_ne!(generate(200, 1).fingerprint(), generate(200, 2).fingerprint());
    }

    #[test]
    fn every_row_respects_the_policy() {
        for row in generate(300, 5).examples {
            let pair = policy::candidates(
                row.learning_style,
                row.subject,
                row.time_available,
                row.difficulty,
            );
            assert!(pair.contains(&row.method));
        }
    }

    #[test]
    fn default_draw_covers_all_methods() {
        let counts = generate(DEFAULT_SAMPLES, 42).label_counts();
        assert!(counts.values().all(|&c| c > 0), "{counts:?}");
    }
}
