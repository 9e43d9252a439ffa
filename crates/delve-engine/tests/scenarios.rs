//! Full command sequences against the built-in world.

#![allow(clippy::unwrap_used)]

use delve_engine::{DEATH_NOTICE, World, handle_command};

struct Session {
    world: World,
}

impl Session {
    fn start() -> Self {
        Self {
            world: World::starting().unwrap(),
        }
    }

    fn send(&mut self, command: &str) -> String {
        handle_command(&mut self.world, command)
    }

    fn send_all(&mut self, commands: &[&str]) {
        for command in commands {
            self.send(command);
        }
    }

    fn look(&mut self) -> String {
        self.send("wizard: look").to_lowercase()
    }

    fn inv(&mut self) -> String {
        self.send("wizard: inv").to_lowercase()
    }
}

#[test]
fn players_are_listed_with_their_names() {
    let mut s = Session::start();
    assert!(s.send("wizard: look").contains("wizard"));
    assert!(s.send("    dog      man     : look").contains("dog      man"));
    let reply = s.send("    cat   elf     : look");
    assert!(reply.contains("wizard") && reply.contains("dog      man") && reply.contains("cat   elf"));
    assert!(reply.contains("cat   elf: Player #3"));
}

#[test]
fn empty_inventory_both_spellings() {
    let mut s = Session::start();
    let expected = "Your inventory is currently empty, try picking an artefact up using 'get'.";
    assert_eq!(s.send("wizard: inv"), expected);
    assert_eq!(s.send("wizard: inventory"), expected);
}

#[test]
fn goto_changes_look() {
    let mut s = Session::start();
    s.send("wizard: goto forest");
    assert!(s.look().starts_with("you are currently in the forest"));
}

#[test]
fn get_then_drop() {
    let mut s = Session::start();
    s.send("wizard: get coin");
    assert!(s.inv().contains("coin"));
    assert!(!s.look().contains("coin"));
    s.send("wizard: drop coin");
    assert!(!s.inv().contains("coin"));
    assert!(s.look().contains("coin"));
}

#[test]
fn open_trapdoor_consumes_key_and_reveals_cellar() {
    let mut s = Session::start();
    s.send_all(&["wizard: goto forest", "wizard: get key"]);
    assert!(s.inv().contains("key"));
    s.send("wizard: goto cabin");
    assert!(!s.look().contains("cellar"));
    let reply = s.send("wizard: open trapdoor");
    assert_eq!(reply, "You unlock the trapdoor and see steps leading down into a cellar");
    assert!(!s.inv().contains("key"));
    assert!(s.look().contains("cellar: a dusty cellar"));
}

#[test]
fn cutting_down_the_tree_consumes_furniture_and_produces_log() {
    let mut s = Session::start();
    s.send_all(&["wizard: get axe", "wizard: goto forest"]);
    assert!(s.look().contains("tree"));
    s.send("wizard: cut down tree");
    let look = s.look();
    assert!(!look.contains("tree"));
    assert!(look.contains("log: a heavy wooden log"));
}

#[test]
fn attacking_costs_health() {
    let mut s = Session::start();
    s.send_all(&[
        "wizard: goto forest",
        "wizard: get key",
        "wizard: goto cabin",
        "wizard: open trapdoor",
        "wizard: goto cellar",
    ]);
    assert_eq!(s.send("wizard: health"), "Your current health is 3.");
    s.send("wizard: attack elf");
    assert_eq!(s.send("wizard: health"), "Your current health is 2.");
}

#[test]
fn dying_drops_everything_and_respawns_at_start() {
    let mut s = Session::start();
    s.send_all(&[
        "wizard: get potion",
        "wizard: get axe",
        "wizard: get coin",
        "wizard: goto forest",
        "wizard: get key",
        "wizard: goto cabin",
        "wizard: open trapdoor",
        "wizard: goto cellar",
        "wizard: attack elf",
        "wizard: attack elf",
    ]);
    let inv = s.inv();
    assert!(inv.contains("potion") && inv.contains("axe") && inv.contains("coin"));

    let reply = s.send("wizard: hit elf");
    assert!(reply.ends_with(&format!("\n{DEATH_NOTICE}")));
    assert!(s.look().starts_with("you are currently in the cabin"));
    assert_eq!(s.send("wizard: health"), "Your current health is 3.");
    assert!(s.inv().contains("empty"));

    s.send("wizard: goto cellar");
    let look = s.look();
    assert!(look.contains("potion") && look.contains("axe") && look.contains("coin"));
    assert!(s.world.ownership_census().values().all(|n| *n == 1));
}

#[test]
fn paying_the_elf_produces_a_shovel() {
    let mut s = Session::start();
    s.send_all(&[
        "wizard: get coin",
        "wizard: goto forest",
        "wizard: get key",
        "wizard: goto cabin",
        "wizard: open trapdoor",
        "wizard: goto cellar",
    ]);
    assert!(!s.look().contains("shovel"));
    s.send("wizard: pay elf");
    assert!(s.look().contains("shovel"));
    assert!(!s.inv().contains("coin"));
}

#[test]
fn blowing_the_horn_summons_the_lumberjack() {
    let mut s = Session::start();
    s.send_all(&["wizard: goto forest", "wizard: goto riverbank", "wizard: get horn"]);
    assert!(!s.look().contains("lumberjack"));
    s.send("wizard: blow horn");
    assert!(s.look().contains("lumberjack: a burly wood cutter"));
    assert!(s.inv().contains("horn"));
}

#[test]
fn whole_game_to_the_gold() {
    let mut s = Session::start();
    s.send_all(&[
        "wizard: get axe",
        "wizard: get coin",
        "wizard: goto forest",
        "wizard: get key",
        "wizard: chop tree",
        "wizard: get log",
        "wizard: goto cabin",
        "wizard: unlock trapdoor",
        "wizard: goto cellar",
        "wizard: pay elf",
        "wizard: get shovel",
        "wizard: goto cabin",
        "wizard: goto forest",
        "wizard: goto riverbank",
        "wizard: bridge river",
        "wizard: goto clearing",
    ]);
    assert!(s.look().starts_with("you are currently in the clearing"));
    assert_eq!(
        s.send("wizard: dig ground"),
        "You dig into the soft ground and unearth a pot of gold !!!"
    );
    s.send("wizard: get gold");
    assert!(s.inv().contains("gold"));
    assert!(s.look().contains("hole"));
    assert!(s.world.ownership_census().values().all(|n| *n == 1));
}
