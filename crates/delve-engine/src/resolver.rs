//! Action resolver: maps a command body onto exactly one declared action.
//!
//! Resolution runs in two stages. First a trigger phrase is found as a
//! substring of the body (longest phrase wins, ties go to the phrase
//! declared first). Then the body's subject tokens pick one action among
//! those registered under that trigger. Each stage fails with a
//! [`ResolveError`] whose `Display` text is shown to the player unchanged.

use std::collections::BTreeSet;

use delve_types::Action;
use tracing::debug;

use crate::catalog::{ActionCatalog, TriggerEntry};

/// Why a command body did not resolve to a single action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No trigger phrase occurs in the body.
    #[error("Couldn't find any action words in your command, please try again.")]
    TriggerNotFound,

    /// A trigger matched but no action under it names a subject in the body.
    #[error("Couldn't find any matching subject entities in your command, please try again.")]
    SubjectNotFound,

    /// The body names a subject that none of the trigger's actions use.
    #[error("You tried to perform the action using the incorrect object, please try again.")]
    ExtraneousEntity,

    /// More than one action under the trigger matches the named subjects.
    #[error("There are multiple '{trigger}' actions available to you, which would you like to perform?")]
    MultipleActionsAvailable {
        /// The matched trigger phrase.
        trigger: String,
    },
}

/// A successfully resolved command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// The trigger phrase that matched.
    pub trigger: &'a str,
    /// The single action selected under that trigger.
    pub action: &'a Action,
}

/// Split a body into whitespace tokens with surrounding ASCII punctuation
/// removed. Empty tokens are dropped.
pub fn tokens(body: &str) -> impl Iterator<Item = &str> {
    body.split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|token| !token.is_empty())
}

/// Find the trigger phrase a body invokes.
///
/// Among all phrases occurring as substrings of `body`, the longest is
/// chosen; equally long phrases resolve to the one declared first.
pub fn identify_trigger<'a>(body: &str, catalog: &'a ActionCatalog) -> Option<&'a TriggerEntry> {
    catalog
        .triggers()
        .filter(|entry| body.contains(entry.phrase.as_str()))
        .fold(None, |best: Option<&TriggerEntry>, entry| match best {
            Some(current) if current.phrase.len() >= entry.phrase.len() => Some(current),
            _ => Some(entry),
        })
}

/// Tokens of `body` that are a subject of any registered action.
pub fn present_subjects(body: &str, catalog: &ActionCatalog) -> BTreeSet<String> {
    tokens(body)
        .filter(|token| catalog.is_subject(token))
        .map(str::to_owned)
        .collect()
}

/// Resolve a lower-cased command body to a single action.
///
/// Actions under the matched trigger are scanned in declaration order. An
/// action is a candidate when at least one of its subjects is still among
/// the present subject tokens; each matched token is used up as it is
/// found, so later actions cannot claim it again.
///
/// # Errors
///
/// Returns [`ResolveError::TriggerNotFound`] when no phrase matches,
/// [`ResolveError::ExtraneousEntity`] when a subject token is left over
/// after the scan, [`ResolveError::SubjectNotFound`] when no action is a
/// candidate, and [`ResolveError::MultipleActionsAvailable`] when more than
/// one is.
pub fn resolve<'a>(body: &str, catalog: &'a ActionCatalog) -> Result<Resolution<'a>, ResolveError> {
    let entry = identify_trigger(body, catalog).ok_or(ResolveError::TriggerNotFound)?;
    let mut present = present_subjects(body, catalog);

    let mut candidates: Vec<&Action> = Vec::new();
    for action in &entry.actions {
        let mut matched = false;
        for subject in &action.subjects {
            if present.remove(subject) {
                matched = true;
            }
        }
        if matched {
            candidates.push(action);
        }
    }

    if !present.is_empty() {
        debug!(trigger = %entry.phrase, leftover = ?present, "Extraneous subjects in command");
        return Err(ResolveError::ExtraneousEntity);
    }

    match candidates.as_slice() {
        [] => Err(ResolveError::SubjectNotFound),
        [only] => {
            let action = *only;
            debug!(trigger = %entry.phrase, narration = %action.narration, "Action resolved");
            Ok(Resolution {
                trigger: &entry.phrase,
                action,
            })
        }
        _ => Err(ResolveError::MultipleActionsAvailable {
            trigger: entry.phrase.clone(),
        }),
    }
}
