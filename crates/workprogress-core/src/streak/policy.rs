//! Rule deciding whether a day counts toward a streak.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Which daily signals make a day qualify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationPolicy {
    /// A positive task count or a mood marker is enough
    #[default]
    CountOrMood,
    /// Only a positive task count qualifies; mood alone does not
    CountOnly,
}

impl QualificationPolicy {
    pub const ALL: [QualificationPolicy; 2] =
        [QualificationPolicy::CountOrMood, QualificationPolicy::CountOnly];

    /// Apply the policy to a day's signals.
    ///
    /// `max_count` is the highest count recorded for any task that day.
    /// A mood that is empty or only whitespace is treated as unset.
    pub fn qualifies(&self, max_count: i64, mood: Option<&str>) -> bool {
        let has_count = max_count > 0;
        let has_mood = mood.is_some_and(|m| !m.trim().is_empty());
        match self {
            QualificationPolicy::CountOrMood => has_count || has_mood,
            QualificationPolicy::CountOnly => has_count,
        }
    }

    /// Name as written in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            QualificationPolicy::CountOrMood => "count_or_mood",
            QualificationPolicy::CountOnly => "count_only",
        }
    }
}

impl fmt::Display for QualificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualificationPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "policy".into(),
                message: format!("unknown policy '{s}', expected count_or_mood or count_only"),
            })
    }
}
