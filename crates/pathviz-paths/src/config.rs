use std::time::Duration;

use pathviz_core::SearchError;

use crate::algorithm::Algorithm;

/// Animation speed presets for a search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl Speed {
    pub const ALL: [Speed; 3] = [Self::Slow, Self::Medium, Self::Fast];

    /// Delay between two search steps.
    pub const fn step_delay(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(75),
            Self::Medium => Duration::from_millis(15),
            Self::Fast => Duration::from_millis(2),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Medium => "Medium",
            Self::Fast => "Fast",
        }
    }

    /// The next preset, wrapping from Fast back to Slow.
    pub const fn next(self) -> Self {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }
}

/// Configuration of one search run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub step_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl SearchConfig {
    /// A configuration for `algorithm` at the default speed.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            step_delay: Speed::default().step_delay(),
        }
    }

    /// Parse the algorithm from its exact name.
    pub fn from_name(name: &str, step_delay_ms: u64) -> Result<Self, SearchError> {
        Ok(Self::new(name.parse()?).with_step_delay(Duration::from_millis(step_delay_ms)))
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.step_delay = speed.step_delay();
        self
    }

    pub fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }
}
