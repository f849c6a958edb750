//! Categorical vocabularies and the synthetic dataset types.
//!
//! Canonical strings are the labels learners see in the UI; they are also the
//! values the encoder is fitted on, so changing one changes the model.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::common::error::AdvisorError;
use crate::common::ids::Fingerprint;

/// Declares a closed categorical enum with its canonical strings.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            /// Every value, in catalog order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Canonical string for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Look up a value by its canonical string.
            pub fn parse(raw: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.as_str() == raw)
            }

            /// Name of the vocabulary, used in error messages.
            pub const KIND: &'static str = $kind;
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Preferred way of taking in material.
    LearningStyle, "learning_style" {
        Visual => "Visual",
        Auditory => "Auditivo",
        Kinesthetic => "Cinestésico",
        ReadingWriting => "Leitura/Escrita",
    }
}

categorical! {
    Subject, "subject" {
        Mathematics => "Matemática",
        Science => "Ciências",
        History => "História",
        Languages => "Línguas",
        Literature => "Literatura",
        Computing => "Informática",
        Art => "Arte",
        Philosophy => "Filosofia",
    }
}

categorical! {
    /// Time tier the learner can dedicate to a session.
    TimeAvailable, "time_available" {
        Short => "1-2 horas",
        Medium => "3-4 horas",
        Long => "5+ horas",
    }
}

categorical! {
    /// Perceived difficulty of the material.
    Difficulty, "difficulty" {
        Low => "Baixa",
        Medium => "Média",
        High => "Alta",
    }
}

categorical! {
    /// The closed set of methods the advisor can recommend.
    StudyMethod, "study_method" {
        ActiveReading => "Leitura ativa e anotações",
        Flashcards => "Flashcards e repetição espaçada",
        MindMaps => "Mapas mentais e conceituais",
        ProblemSolving => "Resolução prática de problemas",
        GroupStudy => "Estudo em grupo",
        Multimedia => "Vídeos e materiais multimídia",
        Summaries => "Resumos e esquemas",
        Simulations => "Simulações e exercícios",
    }
}

impl FromStr for StudyMethod {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AdvisorError::UnknownMethod(s.to_string()))
    }
}

/// A single labelled row of the synthetic training set.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TrainingExample {
    pub learning_style: LearningStyle,
    pub subject: Subject,
    pub time_available: TimeAvailable,
    pub difficulty: Difficulty,
    pub method: StudyMethod,
}

impl TrainingExample {
    /// Feature values as canonical strings, in encoder feature order.
    pub fn feature_strs(&self) -> [&'static str; 4] {
        [
            self.learning_style.as_str(),
            self.subject.as_str(),
            self.time_available.as_str(),
            self.difficulty.as_str(),
        ]
    }
}

/// Generated dataset together with the seed that produced it.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub seed: u64,
    pub examples: Vec<TrainingExample>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Content hash over every row; equal datasets share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Fingerprint::new();
        for example in &self.examples {
            for value in example.feature_strs() {
                hasher.update_field(value);
            }
            hasher.update_field(example.method.as_str());
        }
        hasher.finish_hex()
    }

    /// Number of rows per method, including methods that never occur.
    pub fn label_counts(&self) -> BTreeMap<StudyMethod, usize> {
        let mut counts: BTreeMap<StudyMethod, usize> =
            StudyMethod::ALL.iter().map(|m| (*m, 0)).collect();
        for example in &self.examples {
            *counts.entry(example.method).or_insert(0) += 1;
        }
        counts
    }
}
