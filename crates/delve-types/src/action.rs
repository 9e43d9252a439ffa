//! Immutable action definitions.
//!
//! An [`Action`] is what a trigger phrase selects: the entities it concerns
//! (`subjects`), the entities it removes from play (`consumed`), the entities
//! it brings into play (`produced`), and the narration returned on success.
//! The `"health"` name in `consumed`/`produced` refers to player health, see
//! [`HEALTH_SENTINEL`](crate::HEALTH_SENTINEL).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::HEALTH_SENTINEL;

/// A declared action, shared by every trigger phrase it is registered under.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Entity names the action concerns; all must be reachable to execute.
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    /// Names moved out of visible play when the action executes.
    #[serde(default)]
    pub consumed: BTreeSet<String>,
    /// Names brought into visible play when the action executes.
    #[serde(default)]
    pub produced: BTreeSet<String>,
    /// Text returned to the player on success.
    pub narration: String,
}

impl Action {
    /// Build an action from string slices.
    pub fn new(subjects: &[&str], consumed: &[&str], produced: &[&str], narration: &str) -> Self {
        let owned = |names: &[&str]| names.iter().map(|n| (*n).to_owned()).collect();
        Self {
            subjects: owned(subjects),
            consumed: owned(consumed),
            produced: owned(produced),
            narration: narration.to_owned(),
        }
    }

    /// Whether the action lowers player health, and so may kill.
    pub fn consumes_health(&self) -> bool {
        self.consumed.contains(HEALTH_SENTINEL)
    }
}
