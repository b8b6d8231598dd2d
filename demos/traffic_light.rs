//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic table-driven state machine.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - Events with no mapping are ignored
//! - Strict mode reports them instead
//!
//! Run with: cargo run --example traffic_light

use hookstate::fsm::{Machine, TransitionMode};
use hookstate::transition_table;

fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    println!("=== Traffic Light State Machine ===\n");

    let table = transition_table! {
        initial: red,
        red => { TIMER => green },
        green => { TIMER => yellow, EMERGENCY => red },
        yellow => { TIMER => red },
    };

    let mut light = match Machine::try_new(table.clone()) {
        Ok(machine) => machine,
        Err(err) => {
            eprintln!("invalid table: {err}");
            return;
        }
    };

    println!("Initial state: {}\n", light.state());

    for event in ["TIMER", "TIMER", "EMERGENCY", "TIMER", "EMERGENCY"] {
        let before = light.state().to_string();
        let _ = light.transition(event);
        println!("  {before:<7} --{event:<9}--> {}", light.state());
    }

    println!("\nPath: {}", light.history().get_path().join(" -> "));

    println!("\nSame table in strict mode:");
    let mut strict = Machine::new(table.mode(TransitionMode::Strict));
    match strict.transition("EMERGENCY") {
        Ok(step) => println!("  unexpected step: {step:?}"),
        Err(err) => println!("  {err}"),
    }

    println!("\n=== Example Complete ===");
}
