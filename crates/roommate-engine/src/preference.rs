//! Student preference records and their numeric encoding.
//!
//! A [`StudentPreference`] is what the caller sends: an identifier, a few display
//! fields, and five lifestyle attributes typed in by the student. Most attributes are
//! free text, so the [`PreferenceEncoder`] maps them onto `[0, 1]` by keyword lookup.
//!
//! # Encoding Rules
//!
//! | Axis        | 0.2                               | 0.5                             | 0.8                                     |
//! |-------------|-----------------------------------|---------------------------------|-----------------------------------------|
//! | sleep       | `early`, `10 pm`, `11 pm`         | `normal`, `12 am`, `1 am`       | `late`, `2 am`, `3 am`                  |
//! | study       | `quiet`, `library`, `silent`      | `moderate`, `flexible`          | `group`, `music`, `social`              |
//! | lifestyle   | `quiet`, `reserved`, `introvert`  | `balanced`, `moderate`, `ambivert` | `social`, `outgoing`, `extrovert`, `party` |
//!
//! Matching is a case-insensitive substring test and the first matching column wins.
//! Cleanliness and noise tolerance are levels on a 1-10 scale and are divided by ten.
//!
//! Every attribute that is absent, empty, or unrecognized encodes to
//! [`NEUTRAL_VALUE`]. This is the only place defaults are applied; everything
//! downstream works on complete [`FeatureVector`]s.
//!
//! # Example
//!
//! ```
//! use roommate_engine::{feature::Axis, preference::{PreferenceEncoder, StudentPreference}};
//!
//! let student = StudentPreference {
//!     sleep_schedule: Some("Early (10 PM)".to_owned()),
//!     cleanliness: Some(9.0),
//!     ..StudentPreference::default()
//! };
//! let features = PreferenceEncoder::encode(&student);
//! assert_eq!(features[Axis::Sleep], 0.2);
//! assert_eq!(features[Axis::Cleanliness], 0.9);
//! assert_eq!(features[Axis::Study], 0.5);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feature::{Axis, FeatureVector};

/// Encoded value for any attribute that is missing or not recognized.
pub const NEUTRAL_VALUE: f64 = 0.5;

/// Upper bound of the cleanliness and noise tolerance scales.
pub const LEVEL_SCALE: f64 = 10.0;

/// One student's record as supplied in a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPreference {
    /// Primary identifier (`_id` on the wire).
    #[serde(rename = "_id")]
    pub record_id: Option<String>,
    /// Secondary identifier, used when `_id` is absent.
    pub id: Option<String>,

    // Display fields are echoed back as sent, whatever their JSON type.
    pub name: Option<Value>,
    pub student_id: Option<Value>,
    pub email: Option<Value>,
    pub course: Option<Value>,
    pub year: Option<Value>,

    pub sleep_schedule: Option<String>,
    pub cleanliness: Option<f64>,
    pub study_habits: Option<String>,
    pub noise_tolerance: Option<f64>,
    pub lifestyle: Option<String>,
}

impl StudentPreference {
    /// The identifier used to look this student up: `_id`, falling back to `id`.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.record_id.as_deref().or(self.id.as_deref())
    }
}

/// Keywords that select one encoded value.
#[derive(Debug, Clone, Copy)]
struct KeywordRule {
    keywords: &'static [&'static str],
    value: f64,
}

const fn rule(keywords: &'static [&'static str], value: f64) -> KeywordRule {
    KeywordRule { keywords, value }
}

const SLEEP_SCHEDULE_RULES: &[KeywordRule] = &[
    rule(&["early", "10 pm", "11 pm"], 0.2),
    rule(&["normal", "12 am", "1 am"], 0.5),
    rule(&["late", "2 am", "3 am"], 0.8),
];

const STUDY_HABITS_RULES: &[KeywordRule] = &[
    rule(&["quiet", "library", "silent"], 0.2),
    rule(&["moderate", "flexible"], 0.5),
    rule(&["group", "music", "social"], 0.8),
];

const LIFESTYLE_RULES: &[KeywordRule] = &[
    rule(&["quiet", "reserved", "introvert"], 0.2),
    rule(&["balanced", "moderate", "ambivert"], 0.5),
    rule(&["social", "outgoing", "extrovert", "party"], 0.8),
];

/// Maps [`StudentPreference`] records onto [`FeatureVector`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceEncoder;

impl PreferenceEncoder {
    /// Encodes all five attributes of `student`. Never fails.
    #[must_use]
    pub fn encode(student: &StudentPreference) -> FeatureVector {
        FeatureVector::from_fn(|axis| match axis {
            Axis::Sleep => Self::encode_sleep_schedule(student.sleep_schedule.as_deref()),
            Axis::Cleanliness => Self::encode_level(student.cleanliness),
            Axis::Study => Self::encode_study_habits(student.study_habits.as_deref()),
            Axis::Noise => Self::encode_level(student.noise_tolerance),
            Axis::Lifestyle => Self::encode_lifestyle(student.lifestyle.as_deref()),
        })
    }

    /// Encodes every student in order.
    #[must_use]
    pub fn encode_all<'a, I>(students: I) -> Vec<FeatureVector>
    where
        I: IntoIterator<Item = &'a StudentPreference>,
    {
        students.into_iter().map(Self::encode).collect()
    }

    /// Early sleepers encode low, late sleepers high.
    #[must_use]
    pub fn encode_sleep_schedule(schedule: Option<&str>) -> f64 {
        encode_keywords(schedule, SLEEP_SCHEDULE_RULES)
    }

    /// Quiet studiers encode low, group or music studiers high.
    #[must_use]
    pub fn encode_study_habits(habits: Option<&str>) -> f64 {
        encode_keywords(habits, STUDY_HABITS_RULES)
    }

    /// Reserved lifestyles encode low, social ones high.
    #[must_use]
    pub fn encode_lifestyle(lifestyle: Option<&str>) -> f64 {
        encode_keywords(lifestyle, LIFESTYLE_RULES)
    }

    /// Encodes a 1-10 level (cleanliness, noise tolerance) as `level / 10`.
    ///
    /// Out-of-scale levels are clamped to `0..=10` so the result stays in `[0, 1]`.
    #[must_use]
    pub fn encode_level(level: Option<f64>) -> f64 {
        match level {
            Some(level) if level.is_finite() => level.clamp(0.0, LEVEL_SCALE) / LEVEL_SCALE,
            _ => NEUTRAL_VALUE,
        }
    }
}

fn encode_keywords(text: Option<&str>, rules: &[KeywordRule]) -> f64 {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return NEUTRAL_VALUE;
    };
    let text = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| text.contains(k)))
        .map_or(NEUTRAL_VALUE, |rule| rule.value)
}
