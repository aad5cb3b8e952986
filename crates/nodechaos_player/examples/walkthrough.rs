// SPDX-License-Identifier: MIT OR Apache-2.0
//! Plays a three-beat quest from the command line: the start beat
//! grants a key, one exit is gated on it, and one exit stays locked
//! for the whole session.

use nodechaos_graph::{Graph, Item, ItemRegistry, Node};
use nodechaos_player::Playback;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut registry = ItemRegistry::new();
    let key = Item::new("Brass Key");
    let sword = Item::new("Sword");
    registry.register(key.clone());
    registry.register(sword.clone());

    let mut graph = Graph::new("The Locked Door");

    let cell = Node::new("Cell", [0.0, 0.0])
        .with_text("You wake in a cell. A brass key glints in the straw.")
        .grants(key.clone());
    let door = Node::new("Door", [250.0, 0.0])
        .with_text("The key turns. The corridor beyond is dark.")
        .requires(key);
    let armory = Node::new("Armory", [250.0, 150.0])
        .with_text("Racks of steel, behind an iron gate.")
        .requires(sword);
    let yard = Node::new("Yard", [500.0, 0.0]).with_text("Open sky. You are out.");

    let cell_out = cell.outputs[0].id;
    let door_in = door.inputs[0].id;
    let door_out = door.outputs[0].id;
    let armory_in = armory.inputs[0].id;
    let yard_in = yard.inputs[0].id;

    let cell_id = graph.add_node(cell).expect("fresh id");
    let door_id = graph.add_node(door).expect("fresh id");
    let armory_id = graph.add_node(armory).expect("fresh id");
    let yard_id = graph.add_node(yard).expect("fresh id");

    graph.connect(cell_id, cell_out, door_id, door_in).expect("valid ports");
    graph.connect(cell_id, cell_out, armory_id, armory_in).expect("valid ports");
    graph.connect(door_id, door_out, yard_id, yard_in).expect("valid ports");

    let mut playback = Playback::new();
    playback.start(&graph, cell_id);

    while let Some(current) = playback.current_node() {
        let node = graph.node(current).expect("current node exists");
        println!("\n== {} ==", node.detail.title);
        println!("{}", node.detail.text);
        for (i, option) in playback.options().iter().enumerate() {
            let marker = if option.locked { "x" } else { ">" };
            println!("  {marker} [{i}] {}", option.title);
        }

        // Walk the first unlocked option until a dead end
        let next = playback.options().iter().position(|o| !o.locked);
        match next {
            Some(index) => {
                playback.select(&graph, index);
            }
            None => break,
        }
        if playback.current_node() == Some(yard_id) {
            let node = graph.node(yard_id).expect("yard exists");
            println!("\n== {} ==", node.detail.title);
            println!("{}", node.detail.text);
            break;
        }
    }

    playback.stop();
}
