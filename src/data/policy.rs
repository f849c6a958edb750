//! Labelling rules for the synthetic training set.
//!
//! Each feature combination maps to a pair of equally valid methods; the label
//! is a uniform draw from that pair. The rules produce a learnable signal and
//! make no claim about real pedagogy.

use rand::seq::SliceRandom;
use rand::Rng;

use super::domain::{Difficulty, LearningStyle, StudyMethod, Subject, TimeAvailable};

/// The methods a combination may be labelled with. Learning style is checked first.
pub fn candidates(
    style: LearningStyle,
    subject: Subject,
    time: TimeAvailable,
    difficulty: Difficulty,
) -> [StudyMethod; 2] {
    use StudyMethod::*;

    match style {
        LearningStyle::Visual => {
            if matches!(subject, Subject::Mathematics | Subject::Science) {
                [MindMaps, Simulations]
            } else {
                [MindMaps, Multimedia]
            }
        }
        LearningStyle::Auditory => {
            if difficulty == Difficulty::High {
                [GroupStudy, Multimedia]
            } else {
                [ActiveReading, GroupStudy]
            }
        }
        LearningStyle::Kinesthetic => {
            if matches!(
                subject,
                Subject::Mathematics | Subject::Science | Subject::Computing
            ) {
                [ProblemSolving, Simulations]
            } else {
                [Flashcards, GroupStudy]
            }
        }
        LearningStyle::ReadingWriting => {
            if time == TimeAvailable::Short {
                [Summaries, Flashcards]
            } else {
                [ActiveReading, Summaries]
            }
        }
    }
}

/// Label a combination. Consumes exactly one draw from `rng`.
pub fn label<R: Rng + ?Sized>(
    style: LearningStyle,
    subject: Subject,
    time: TimeAvailable,
    difficulty: Difficulty,
    rng: &mut R,
) -> StudyMethod {
    let pair = candidates(style, subject, time, difficulty);
    // Never empty, so the fallback is unreachable.
    *pair.choose(rng).unwrap_or(&pair[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn every_combination() -> Vec<(LearningStyle, Subject, TimeAvailable, Difficulty)> {
        let mut out = Vec::new();
        for &s in LearningStyle::ALL {
            for &sub in Subject::ALL {
                for &t in TimeAvailable::ALL {
                    for &d in Difficulty::ALL {
                        out.push((s, sub, t, d));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn label_is_always_a_candidate() {
        let mut rng = StdRng::seed_from_u64(7);
        for (s, sub, t, d) in every_combination() {
            let picked = label(s, sub, t, d, &mut rng);
            assert!(candidates(s, sub, t, d).contains(&picked));
        }
    }

    #[test]
    fn visual_math_prefers_maps_or_simulations() {
        let pair = candidates(
            LearningStyle::Visual,
            Subject::Mathematics,
            TimeAvailable::Medium,
            Difficulty::Medium,
        );
        assert_eq!(pair, [StudyMethod::MindMaps, StudyMethod::Simulations]);
    }

    #[test]
    fn auditory_branch_depends_on_difficulty_only() {
        for &sub in Subject::ALL {
            assert_eq!(
                candidates(
                    LearningStyle::Auditory,
                    sub,
                    TimeAvailable::Long,
                    Difficulty::High
                ),
                [StudyMethod::GroupStudy, StudyMethod::Multimedia]
            );
            assert_eq!(
                candidates(
                    LearningStyle::Auditory,
                    sub,
                    TimeAvailable::Long,
                    Difficulty::Low
                ),
                [StudyMethod::ActiveReading, StudyMethod::GroupStudy]
            );
        }
    }

    #[test]
    fn kinesthetic_computing_is_hands_on() {
        let pair = candidates(
            LearningStyle::Kinesthetic,
            Subject::Computing,
            TimeAvailable::Short,
            Difficulty::Low,
        );
        assert_eq!(pair, [StudyMethod::ProblemSolving, StudyMethod::Simulations]);
    }

    #[test]
    fn reading_writing_short_sessions_get_summaries_or_flashcards() {
        let pair = candidates(
            LearningStyle::ReadingWriting,
            Subject::History,
            TimeAvailable::Short,
            Difficulty::High,
        );
        assert_eq!(pair, [StudyMethod::Summaries, StudyMethod::Flashcards]);
    }

    #[test]
    fn both_candidates_are_drawn() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            seen.insert(label(
                LearningStyle::Visual,
                Subject::Art,
                TimeAvailable::Short,
                Difficulty::Low,
                &mut rng,
            ));
        }
        assert_eq!(seen.len(), 2);
    }
}
