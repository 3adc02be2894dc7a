//! Content Request
//!
//! The immutable set of attributes the strategy and adaptation engines work
//! from. Built from a completed workflow or deserialized directly.

use serde::{Deserialize, Serialize};

use crate::core::adaptation::IntensityLevel;
use crate::core::strategy::grade::deserialize_grade;

/// Attributes of one content request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRequest {
    /// Grade ordinal, 0 (kindergarten) to 12. Labels such as "3rd grade" are
    /// accepted when deserializing.
    #[serde(deserialize_with = "deserialize_grade")]
    pub grade_level: u8,
    pub subject: String,
    pub topic: String,
    #[serde(default)]
    pub style: String,
    #[serde(default = "default_problem_count")]
    pub problem_count: u32,
    #[serde(default = "default_intensity")]
    pub intensity_level: IntensityLevel,
    #[serde(default)]
    pub profile_key: Option<String>,
}

fn default_problem_count() -> u32 {
    10
}

fn default_intensity() -> IntensityLevel {
    IntensityLevel::Secular
}

impl ContentRequest {
    pub fn new(grade_level: u8, subject: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            grade_level,
            subject: subject.into(),
            topic: topic.into(),
            style: String::new(),
            problem_count: default_problem_count(),
            intensity_level: default_intensity(),
            profile_key: None,
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_problem_count(mut self, count: u32) -> Self {
        self.problem_count = count;
        self
    }

    pub fn with_intensity(mut self, level: IntensityLevel) -> Self {
        self.intensity_level = level;
        self
    }

    pub fn with_profile(mut self, key: impl Into<String>) -> Self {
        self.profile_key = Some(key.into());
        self
    }
}
