//! Built-in commands available in every world.
//!
//! These verbs are checked before action resolution, in a fixed priority
//! order: `inventory`/`inv`, `get`, `drop`, `goto`, `look`, `health`. A verb
//! must appear as a whole token, so `forget` is not `get`. The object of
//! `get`, `drop`, and `goto` is found by substring, taking the first match
//! in name order.

use core::fmt::Write as _;

use delve_types::{Described, EntityKind, Player};
use delve_world::WorldMap;

use crate::error::EngineError;
use crate::players::PlayerRegistry;
use crate::resolver::tokens;
use crate::world::World;

/// One of the universal verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinCommand {
    /// List carried artefacts.
    Inventory,
    /// Pick up an artefact from the current location.
    Get,
    /// Put a carried artefact down at the current location.
    Drop,
    /// Move along a path to an adjacent location.
    Goto,
    /// Describe the current location.
    Look,
    /// Report current health.
    Health,
}

impl BuiltinCommand {
    /// Verbs in priority order, each with the words that invoke it.
    const VERBS: [(Self, &'static [&'static str]); 6] = [
        (Self::Inventory, &["inventory", "inv"]),
        (Self::Get, &["get"]),
        (Self::Drop, &["drop"]),
        (Self::Goto, &["goto"]),
        (Self::Look, &["look"]),
        (Self::Health, &["health"]),
    ];

    /// Find the highest-priority built-in verb in a command body.
    pub fn detect(body: &str) -> Option<Self> {
        Self::VERBS.into_iter().find_map(|(command, words)| {
            tokens(body)
                .any(|token| words.contains(&token))
                .then_some(command)
        })
    }

    /// Carry out the command for a registered player and return the reply.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the player or their location is missing.
    pub fn run(self, body: &str, world: &mut World, player_name: &str) -> Result<String, EngineError> {
        match self {
            Self::Look => look(&world.map, &world.players, world.players.require(player_name)?),
            Self::Inventory => Ok(inventory(world.players.require(player_name)?)),
            Self::Health => {
                let player = world.players.require(player_name)?;
                Ok(format!("Your current health is {}.", player.health))
            }
            Self::Get => get(body, &mut world.map, world.players.require_mut(player_name)?),
            Self::Drop => drop_artefact(body, &mut world.map, world.players.require_mut(player_name)?),
            Self::Goto => goto(body, &mut world.map, world.players.require_mut(player_name)?),
        }
    }
}

fn inventory(player: &Player) -> String {
    if player.inventory.is_empty() {
        return String::from("Your inventory is currently empty, try picking an artefact up using 'get'.");
    }
    let names: Vec<&str> = player.inventory.keys().map(String::as_str).collect();
    format!("Here is what's currently in your inventory: {}", names.join(", "))
}

fn get(body: &str, map: &mut WorldMap, player: &mut Player) -> Result<String, EngineError> {
    let here = map.require_mut(&player.location)?;
    let Some(name) = here.artefacts.keys().find(|name| body.contains(name.as_str())).cloned() else {
        return Ok(String::from("That isn't at this location."));
    };
    let artefact = here.take(EntityKind::Artefact, &name)?;
    player.hold(artefact);
    Ok(format!("You picked up the '{name}' and placed it in your inventory."))
}

fn drop_artefact(body: &str, map: &mut WorldMap, player: &mut Player) -> Result<String, EngineError> {
    let here = map.require_mut(&player.location)?;
    let carried = player.inventory.keys().find(|name| body.contains(name.as_str())).cloned();
    let Some(artefact) = carried.and_then(|name| player.release(&name)) else {
        return Ok(String::from("That isn't in your inventory."));
    };
    let reply = format!("You dropped '{}'.", artefact.name);
    here.place(EntityKind::Artefact, artefact);
    Ok(reply)
}

fn goto(body: &str, map: &mut WorldMap, player: &mut Player) -> Result<String, EngineError> {
    let here = map.require(&player.location)?;
    let Some(target) = here.adjacent.iter().find(|name| body.contains(name.as_str())).cloned() else {
        return Ok(String::from("You can't get there from here."));
    };
    map.move_player(&player.name, &player.location, &target)?;
    let reply = format!("You have moved to the '{target}'.");
    player.location = target;
    Ok(reply)
}

fn look(map: &WorldMap, players: &PlayerRegistry, player: &Player) -> Result<String, EngineError> {
    let here = map.require(&player.location)?;
    let mut out = format!("You are currently in the {}, {}\n\n", here.name(), here.description());

    let sections = [
        ("These are all the artefacts in your current location:", EntityKind::Artefact),
        ("Here is all the furniture:", EntityKind::Furniture),
        ("These are all the characters:", EntityKind::Character),
    ];
    for (heading, kind) in sections {
        section(&mut out, heading, here.entities(kind).values());
    }

    let present = here.players.iter().filter_map(|name| players.get(name));
    section(&mut out, "These are all the players:", present);

    let reachable = here.adjacent.iter().filter_map(|name| map.location(name));
    section(&mut out, "And here are all the locations you can reach from here:", reachable);

    Ok(out)
}

/// Append one `look` section: heading, then `name: description` per entry.
fn section<'a, T: Described + 'a>(out: &mut String, heading: &str, entries: impl Iterator<Item = &'a T>) {
    out.push_str(heading);
    for entry in entries {
        let _ = write!(out, "\n{}: {}", entry.name(), entry.description());
    }
    out.push_str("\n\n");
}
