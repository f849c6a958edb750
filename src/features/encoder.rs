//! Bidirectional string ↔ code tables, one per feature plus one for the label.
//!
//! Codes are dense and assigned in sorted string order, so the same training
//! set always produces the same tables.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::common::error::{AdvisorError, AdvisorResult};
use crate::data::domain::{Dataset, StudyMethod};

/// Input features in the column order the classifier sees.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Feature {
    LearningStyle,
    Subject,
    TimeAvailable,
    Difficulty,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::LearningStyle,
        Feature::Subject,
        Feature::TimeAvailable,
        Feature::Difficulty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::LearningStyle => "learning_style",
            Feature::Subject => "subject",
            Feature::TimeAvailable => "time_available",
            Feature::Difficulty => "difficulty",
        }
    }

    /// Column index in an encoded row.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Code substituted for values never seen during fit.
pub const FALLBACK_CODE: usize = 0;

/// A single fitted column.
#[derive(Clone, Debug, Default)]
pub struct CodeTable {
    values: Vec<String>,
    codes: HashMap<String, usize>,
}

impl CodeTable {
    /// Fit a table over every observed value.
    pub fn fit<'a, I>(observed: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sorted: BTreeSet<&str> = observed.into_iter().collect();
        let values: Vec<String> = sorted.into_iter().map(str::to_string).collect();
        let codes = values
            .iter()
            .enumerate()
            .map(|(code, value)| (value.clone(), code))
            .collect();
        Self { values, codes }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn code(&self, value: &str) -> Option<usize> {
        self.codes.get(value).copied()
    }

    pub fn value(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    /// Fitted values in code order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Encoder tables for all four features and the label.
#[derive(Clone, Debug)]
pub struct FeatureEncoder {
    features: [CodeTable; 4],
    label: CodeTable,
}

impl FeatureEncoder {
    /// Fit every table in one pass over the dataset.
    pub fn fit(dataset: &Dataset) -> Self {
        let features = Feature::ALL.map(|feature| {
            CodeTable::fit(
                dataset
                    .examples
                    .iter()
                    .map(|ex| ex.feature_strs()[feature.index()]),
            )
        });
        let label = CodeTable::fit(dataset.examples.iter().map(|ex| ex.method.as_str()));
        Self { features, label }
    }

    pub fn table(&self, feature: Feature) -> &CodeTable {
        &self.features[feature.index()]
    }

    /// Encode, failing on values absent from the fit.
    pub fn encode_strict(&self, feature: Feature, value: &str) -> AdvisorResult<usize> {
        self.table(feature)
            .code(value)
            .ok_or_else(|| AdvisorError::UnknownFeatureValue {
                feature: feature.name(),
                value: value.to_string(),
            })
    }

    /// Encode for inference: unseen values map to [`FALLBACK_CODE`].
    pub fn encode(&self, feature: Feature, value: &str) -> usize {
        match self.encode_strict(feature, value) {
            Ok(code) => code,
            Err(err) => {
                debug!(%err, fallback = FALLBACK_CODE, "substituting fallback code");
                FALLBACK_CODE
            }
        }
    }

    /// Encode a full request row in column order.
    pub fn encode_row(
        &self,
        learning_style: &str,
        subject: &str,
        time_available: &str,
        difficulty: &str,
    ) -> [usize; 4] {
        [
            self.encode(Feature::LearningStyle, learning_style),
            self.encode(Feature::Subject, subject),
            self.encode(Feature::TimeAvailable, time_available),
            self.encode(Feature::Difficulty, difficulty),
        ]
    }

    pub fn decode(&self, feature: Feature, code: usize) -> AdvisorResult<&str> {
        self.table(feature)
            .value(code)
            .ok_or(AdvisorError::UnknownValue {
                feature: feature.name(),
                code,
            })
    }

    pub fn encode_label(&self, method: StudyMethod) -> AdvisorResult<usize> {
        self.label
            .code(method.as_str())
            .ok_or_else(|| AdvisorError::UnknownFeatureValue {
                feature: StudyMethod::KIND,
                value: method.as_str().to_string(),
            })
    }

    pub fn decode_label(&self, code: usize) -> AdvisorResult<&str> {
        self.label.value(code).ok_or(AdvisorError::UnknownValue {
            feature: StudyMethod::KIND,
            code,
        })
    }

    /// Number of distinct labels seen during fit.
    pub fn n_classes(&self) -> usize {
        self.label.len()
    }

    /// Fitted labels in code order.
    pub fn labels(&self) -> &[String] {
        self.label.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::service::generate;

    fn fitted() -> FeatureEncoder {
        FeatureEncoder::fit(&generate(1000, 42))
    }

    #[test]
    fn codes_follow_sorted_order() {
        let table = CodeTable::fit(["b", "a", "c", "a"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.code("a"), Some(0));
        assert_eq!(table.code("b"), Some(1));
        assert_eq!(table.value(2), Some("c"));
    }

    #[test]
    fn every_vocabulary_value_gets_a_unique_code() {
        let enc = fitted();
        assert_eq!(enc.table(Feature::LearningStyle).len(), 4);
        assert_eq!(enc.table(Feature::Subject).len(), 8);
        assert_eq!(enc.table(Feature::TimeAvailable).len(), 3);
        assert_eq!(enc.table(Feature::Difficulty).len(), 3);
        assert_eq!(enc.n_classes(), 8);

        for feature in Feature::ALL {
            let table = enc.table(feature);
            for (code, value) in table.values().iter().enumerate() {
                assert_eq!(enc.encode_strict(feature, value), Ok(code));
                assert_eq!(enc.decode(feature, code), Ok(value.as_str()));
            }
        }
    }

    #[test]
    fn unseen_value_falls_back_without_failing() {
        let enc = fitted();
        assert!(matches!(
            enc.encode_strict(Feature::LearningStyle, "Telepático"),
            Err(AdvisorError::UnknownFeatureValue { .. })
        ));
        assert_eq!(enc.encode(Feature::LearningStyle, "Telepático"), FALLBACK_CODE);
    }

    #[test]
    fn decode_out_of_range_is_an_error() {
        let enc = fitted();
        assert_eq!(
            enc.decode(Feature::TimeAvailable, 3),
            Err(AdvisorError::UnknownValue {
                feature: "time_available",
                code: 3
            })
        );
        assert!(enc.decode_label(8).is_err());
    }

    #[test]
    fn labels_round_trip() {
        let enc = fitted();
        for method in StudyMethod::ALL {
            let code = enc.encode_label(*method).unwrap();
            assert_eq!(enc.decode_label(code), Ok(method.as_str()));
        }
    }

    #[test]
    fn encode_row_uses_column_order() {
        let enc = fitted();
        let row = enc.encode_row("Visual", "Matemática", "3-4 horas", "Média");
        assert_eq!(row[0], enc.encode(Feature::LearningStyle, "Visual"));
        assert_eq!(row[1], enc.encode(Feature::Subject, "Matemática"));
        assert_eq!(row[2], enc.encode(Feature::TimeAvailable, "3-4 horas"));
        assert_eq!(row[3], enc.encode(Feature::Difficulty, "Média"));
    }
}
