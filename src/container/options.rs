//! Container configuration.

use crate::core::RacePolicy;
use serde::{Deserialize, Serialize};

/// Options shared by every container shape.
///
/// Missing fields fall back to their defaults when deserialized, so an empty
/// JSON object is a valid configuration.
///
/// # Example
///
/// ```rust
/// use hookstate::container::ActionOptions;
/// use hookstate::core::RacePolicy;
///
/// let options = ActionOptions::from_json(r#"{ "label": "profile" }"#).unwrap();
/// assert_eq!(options.label, "profile");
/// assert_eq!(options.race, RacePolicy::LatestWins);
///
/// let options = ActionOptions::new()
///     .label("search")
///     .race(RacePolicy::LastSettledWins);
/// assert_eq!(options.race, RacePolicy::LastSettledWins);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionOptions {
    /// Name attached to the container's log events
    pub label: String,

    /// Treatment of overlapping invocations
    pub race: RacePolicy,
}

impl Default for ActionOptions {
    fn default() -> Self {
        Self {
            label: "action".to_string(),
            race: RacePolicy::default(),
        }
    }
}

impl ActionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the race policy
    pub fn race(mut self, race: RacePolicy) -> Self {
        self.race = race;
        self
    }

    /// Parse options from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
