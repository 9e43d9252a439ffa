//! Registry of every player seen so far.
//!
//! Players are created lazily the first time their name appears before the
//! colon of a command, and live for the rest of the process. Names are
//! case-sensitive exactly as typed.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use delve_types::Player;
use delve_world::WorldMap;
use tracing::info;

use crate::error::EngineError;

/// All known players keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: BTreeMap<String, Player>,
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            players: BTreeMap::new(),
        }
    }

    /// Look up a player, creating them at the starting location if unknown.
    ///
    /// A new player is labelled `Player #N` where N is the number of known
    /// players including the new one, and is added to the starting
    /// location's player set.
    pub fn join(&mut self, name: &str, map: &mut WorldMap) -> Result<&mut Player, EngineError> {
        let label = format!("Player #{}", self.players.len().saturating_add(1));
        match self.players.entry(name.to_owned()) {
            Entry::Occupied(existing) => Ok(existing.into_mut()),
            Entry::Vacant(slot) => {
                let location = map.admit_player(name)?;
                info!(player = name, label = %label, location = %location, "Player joined");
                Ok(slot.insert(Player::new(name, label, location)))
            }
        }
    }

    /// Get a player by name.
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    /// Get a player or fail with [`EngineError::PlayerNotFound`].
    pub fn require(&self, name: &str) -> Result<&Player, EngineError> {
        self.players
            .get(name)
            .ok_or_else(|| EngineError::PlayerNotFound(name.to_owned()))
    }

    /// Mutable variant of [`PlayerRegistry::require`].
    pub fn require_mut(&mut self, name: &str) -> Result<&mut Player, EngineError> {
        self.players
            .get_mut(name)
            .ok_or_else(|| EngineError::PlayerNotFound(name.to_owned()))
    }

    /// Iterate over players in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Number of known players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no player has joined yet.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
