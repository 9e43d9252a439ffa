//! Per-player state: where the player stands, what they carry, their health.
//!
//! Players are created lazily by the engine the first time a name appears in
//! a command and are never removed. Inventory holds artefacts only and is
//! disjoint from every location's sets. Health arithmetic saturates at both
//! ends so it can never leave `0..=MAX_HEALTH`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::MAX_HEALTH;
use crate::entity::{Described, Entity};

/// A human-controlled character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique name, case-sensitive as typed.
    pub name: String,
    /// Display label shown in listings (e.g. `Player #2`).
    pub label: String,
    /// Name of the location the player currently stands in.
    pub location: String,
    /// Carried artefacts keyed by name.
    pub inventory: BTreeMap<String, Entity>,
    /// Remaining health, `0..=MAX_HEALTH`.
    pub health: u8,
}

impl Player {
    /// Create a player with full health and an empty inventory.
    pub fn new(name: impl Into<String>, label: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            location: location.into(),
            inventory: BTreeMap::new(),
            health: MAX_HEALTH,
        }
    }

    /// Check whether the player carries an artefact with this name.
    pub fn holds(&self, name: &str) -> bool {
        self.inventory.contains_key(name)
    }

    /// Put an artefact into the inventory.
    pub fn hold(&mut self, artefact: Entity) {
        self.inventory.insert(artefact.name.clone(), artefact);
    }

    /// Take an artefact out of the inventory, if carried.
    pub fn release(&mut self, name: &str) -> Option<Entity> {
        self.inventory.remove(name)
    }

    /// Empty the inventory, returning everything that was carried.
    ///
    /// Used during death processing when the inventory drops where the
    /// player fell.
    pub fn drain_inventory(&mut self) -> BTreeMap<String, Entity> {
        core::mem::take(&mut self.inventory)
    }

    /// Lose one point of health, stopping at zero.
    pub const fn lose_health(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    /// Gain one point of health, capped at [`MAX_HEALTH`].
    ///
    /// Returns `false` when already at the cap (no-op).
    pub fn gain_health(&mut self) -> bool {
        if self.health >= MAX_HEALTH {
            return false;
        }
        self.health = self.health.saturating_add(1).min(MAX_HEALTH);
        true
    }

    /// Reset health to [`MAX_HEALTH`].
    pub const fn restore_health(&mut self) {
        self.health = MAX_HEALTH;
    }

    /// Whether health has reached zero.
    pub const fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl Described for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.label
    }
}
