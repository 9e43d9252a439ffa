//! Action catalog: declared actions indexed by trigger phrase.
//!
//! Triggers are kept in declaration order because the resolver breaks ties
//! between equally long matching triggers by whichever was declared first.
//! The catalog also remembers every name that appears as a subject of any
//! action, which the resolver uses to spot subject tokens in a command.
//!
//! Action definitions are read from YAML:
//!
//! ```yaml
//! actions:
//!   - triggers: [open, unlock]
//!     subjects: [trapdoor, key]
//!     consumed: [key]
//!     produced: [cellar]
//!     narration: You unlock the trapdoor and see steps leading down into a cellar
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use delve_types::Action;
use serde::Deserialize;
use tracing::info;

/// Errors that can occur when reading action definitions.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the actions file from disk.
    #[error("failed to read actions file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse actions YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An action was declared with blank narration.
    #[error("action #{index} has an empty narration")]
    EmptyNarration {
        /// Zero-based position of the action in the file.
        index: usize,
    },

    /// An action was declared without any usable trigger phrase.
    #[error("action #{index} declares no triggers")]
    NoTriggers {
        /// Zero-based position of the action in the file.
        index: usize,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// One trigger phrase and the actions it may select, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEntry {
    /// Lower-cased, trimmed trigger phrase.
    pub phrase: String,
    /// Actions registered under this phrase.
    pub actions: Vec<Action>,
}

/// All declared actions, indexed by trigger phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionCatalog {
    triggers: Vec<TriggerEntry>,
    subjects: BTreeSet<String>,
}

impl ActionCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action under a trigger phrase.
    ///
    /// The phrase is trimmed and lower-cased. Registering the same action
    /// twice under one phrase is a no-op. Returns `false` if the phrase was
    /// blank or the action was already present.
    pub fn register(&mut self, trigger: &str, action: Action) -> bool {
        let phrase = trigger.trim().to_lowercase();
        if phrase.is_empty() {
            return false;
        }

        let entry = if let Some(pos) = self.triggers.iter().position(|t| t.phrase == phrase) {
            self.triggers.get_mut(pos)
        } else {
            self.triggers.push(TriggerEntry {
                phrase,
                actions: Vec::new(),
            });
            self.triggers.last_mut()
        };
        let Some(entry) = entry else {
            return false;
        };

        if entry.actions.contains(&action) {
            return false;
        }
        self.subjects.extend(action.subjects.iter().cloned());
        entry.actions.push(action);
        true
    }

    /// Every trigger entry in declaration order.
    pub fn triggers(&self) -> impl Iterator<Item = &TriggerEntry> {
        self.triggers.iter()
    }

    /// Whether `name` is a subject of any registered action.
    pub fn is_subject(&self, name: &str) -> bool {
        self.subjects.contains(name)
    }

    /// Number of distinct trigger phrases.
    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

/// Top-level actions document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionsFile {
    /// Declared actions in file order.
    pub actions: Vec<ActionDef>,
}

/// One declared action and the phrases that trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionDef {
    /// Trigger phrases; at least one is required.
    pub triggers: Vec<String>,
    /// Entity names the action concerns.
    #[serde(default)]
    pub subjects: BTreeSet<String>,
    /// Names moved out of play.
    #[serde(default)]
    pub consumed: BTreeSet<String>,
    /// Names brought into play.
    #[serde(default)]
    pub produced: BTreeSet<String>,
    /// Success text.
    pub narration: String,
}

impl ActionsFile {
    /// Validate every definition and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyNarration`] or [`CatalogError::NoTriggers`]
    /// naming the offending action's position.
    pub fn into_catalog(self) -> Result<ActionCatalog, CatalogError> {
        let mut catalog = ActionCatalog::new();
        for (index, def) in self.actions.into_iter().enumerate() {
            if def.narration.trim().is_empty() {
                return Err(CatalogError::EmptyNarration { index });
            }
            if def.triggers.iter().all(|t| t.trim().is_empty()) {
                return Err(CatalogError::NoTriggers { index });
            }
            let action = Action {
                subjects: def.subjects,
                consumed: def.consumed,
                produced: def.produced,
                narration: def.narration,
            };
            for trigger in &def.triggers {
                catalog.register(trigger, action.clone());
            }
        }
        Ok(catalog)
    }
}

/// Parse action definitions from a YAML string.
///
/// # Errors
///
/// Returns [`CatalogError::Yaml`] for malformed YAML, otherwise as
/// [`ActionsFile::into_catalog`].
pub fn parse_actions(yaml: &str) -> Result<ActionCatalog, CatalogError> {
    let file: ActionsFile = serde_yml::from_str(yaml)?;
    file.into_catalog()
}

/// Read and parse action definitions from disk.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
/// [`parse_actions`].
pub fn load_actions(path: &Path) -> Result<ActionCatalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    let catalog = parse_actions(&contents)?;
    info!(
        path = %path.display(),
        trigger_count = catalog.trigger_count(),
        "Actions file loaded"
    );
    Ok(catalog)
}

/// The action set that goes with the built-in starting world.
pub fn create_starting_actions() -> ActionCatalog {
    let definitions: [(&[&str], Action); 8] = [
        (
            &["open", "unlock"],
            Action::new(
                &["trapdoor", "key"],
                &["key"],
                &["cellar"],
                "You unlock the trapdoor and see steps leading down into a cellar",
            ),
        ),
        (
            &["chop", "cut", "cut down"],
            Action::new(&["tree", "axe"], &["tree"], &["log"], "You cut down the tree with the axe"),
        ),
        (
            &["drink"],
            Action::new(&["potion"], &["potion"], &["health"], "You drink the potion and your health improves"),
        ),
        (
            &["fight", "hit", "attack"],
            Action::new(&["elf"], &["health"], &[], "You attack the elf, but he fights back and you lose some health"),
        ),
        (
            &["pay"],
            Action::new(
                &["elf", "coin"],
                &["coin"],
                &["shovel"],
                "You pay the elf your silver coin and he produces a shovel",
            ),
        ),
        (
            &["bridge"],
            Action::new(
                &["log", "river"],
                &["log"],
                &["clearing"],
                "You bridge the river with the log and can now reach the other side",
            ),
        ),
        (
            &["dig"],
            Action::new(
                &["ground", "shovel"],
                &["ground"],
                &["hole", "gold"],
                "You dig into the soft ground and unearth a pot of gold !!!",
            ),
        ),
        (
            &["blow"],
            Action::new(
                &["horn"],
                &[],
                &["lumberjack"],
                "You blow the horn and as if by magic, a lumberjack appears !",
            ),
        ),
    ];

    let mut catalog = ActionCatalog::new();
    for (triggers, action) in definitions {
        for trigger in triggers {
            catalog.register(trigger, action.clone());
        }
    }
    catalog
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn actions_for<'a>(catalog: &'a ActionCatalog, phrase: &str) -> &'a [Action] {
        catalog
            .triggers()
            .find(|t| t.phrase == phrase)
            .map(|t| t.actions.as_slice())
            .unwrap_or_default()
    }

    #[test]
    fn register_normalizes_and_dedupes() {
        let mut catalog = ActionCatalog::new();
        let action = Action::new(&["potion"], &["potion"], &["health"], "Gulp");
        assert!(catalog.register("  Drink ", action.clone()));
        assert!(!catalog.register("drink", action));
        assert!(!catalog.register("   ", Action::default()));
        assert_eq!(catalog.trigger_count(), 1);
        assert_eq!(actions_for(&catalog, "drink").len(), 1);
        assert!(catalog.is_subject("potion"));
    }

    #[test]
    fn one_trigger_many_actions_keeps_order() {
        let mut catalog = ActionCatalog::new();
        catalog.register("open", Action::new(&["trapdoor"], &[], &[], "first"));
        catalog.register("open", Action::new(&["chest"], &[], &[], "second"));
        let narrations: Vec<&str> = actions_for(&catalog, "open").iter().map(|a| a.narration.as_str()).collect();
        assert_eq!(narrations, vec!["first", "second"]);
    }

    #[test]
    fn unknown_trigger_has_no_actions() {
        assert!(actions_for(&create_starting_actions(), "sing").is_empty());
    }

    #[test]
    fn starting_actions_share_definitions_across_triggers() {
        let catalog = create_starting_actions();
        assert_eq!(actions_for(&catalog, "open"), actions_for(&catalog, "unlock"));
        assert_eq!(actions_for(&catalog, "cut down"), actions_for(&catalog, "chop"));
        assert_eq!(catalog.trigger_count(), 13);
    }

    #[test]
    fn parses_actions_yaml() {
        let yaml = r"
actions:
  - triggers: [open, Unlock]
    subjects: [trapdoor, key]
    consumed: [key]
    produced: [cellar]
    narration: You unlock the trapdoor
";
        let catalog = parse_actions(yaml).unwrap();
        assert_eq!(actions_for(&catalog, "unlock").len(), 1);
        assert!(catalog.is_subject("key"));
    }

    #[test]
    fn empty_narration_rejected() {
        let yaml = "actions:\n  - triggers: [wave]\n    narration: '  '\n";
        assert!(matches!(parse_actions(yaml), Err(CatalogError::EmptyNarration { index: 0 })));
    }

    #[test]
    fn missing_triggers_rejected() {
        let yaml = "actions:\n  - triggers: [wave]\n    narration: ok\n  - triggers: []\n    narration: ok\n";
        assert!(matches!(parse_actions(yaml), Err(CatalogError::NoTriggers { index: 1 })));
    }

    #[test]
    fn unknown_keys_rejected() {
        let yaml = "actions:\n  - triggers: [wave]\n    narration: ok\n    sound: loud\n";
        assert!(matches!(parse_actions(yaml), Err(CatalogError::Yaml { .. })));
    }
}
