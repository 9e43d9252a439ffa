//! The YAML files under `config/` describe the same game as the built-in
//! world and actions.

#![allow(clippy::unwrap_used)]

use delve_engine::{World, create_starting_actions, handle_command, parse_actions};
use delve_world::{create_starting_world, parse_world};

const WORLD_YAML: &str = include_str!("../../../config/world.yaml");
const ACTIONS_YAML: &str = include_str!("../../../config/actions.yaml");

#[test]
fn shipped_world_matches_built_in() {
    let shipped = parse_world(WORLD_YAML).unwrap();
    assert_eq!(shipped, create_starting_world().unwrap());
}

#[test]
fn shipped_actions_match_built_in() {
    let shipped = parse_actions(ACTIONS_YAML).unwrap();
    assert_eq!(shipped, create_starting_actions());
}

#[test]
fn shipped_files_play_a_game() {
    let mut world = World::new(parse_world(WORLD_YAML).unwrap(), parse_actions(ACTIONS_YAML).unwrap());
    for command in ["sam: goto forest", "sam: get key", "sam: goto cabin"] {
        handle_command(&mut world, command);
    }
    assert_eq!(
        handle_command(&mut world, "sam: Unlock the TRAPDOOR"),
        "You unlock the trapdoor and see steps leading down into a cellar"
    );
    assert_eq!(handle_command(&mut world, "sam: goto cellar"), "You have moved to the 'cellar'.");
}
