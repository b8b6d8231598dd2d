//! Async Controller
//!
//! This example demonstrates a controller wrapping a slow lookup, with a
//! render loop that redraws from every snapshot.
//!
//! Key concepts:
//! - Busy flag set before the operation runs
//! - Failures captured into the record, prior result kept
//! - Overlapping calls: the latest request wins
//!
//! Run with: cargo run --example async_controller

use hookstate::container::{ActionOptions, Controller};
use hookstate::core::OperationState;
use std::time::Duration;

fn render(state: &OperationState<String, String>) {
    let body = match (&state.result, &state.error) {
        (Some(result), _) => result.clone(),
        (None, Some(err)) => format!("error: {err}"),
        (None, None) => "nothing yet".to_string(),
    };
    let spinner = if state.busy { " (loading)" } else { "" };
    println!("  [{body}]{spinner}");
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    println!("=== Async Controller Example ===\n");

    let lookup = Controller::with_options(
        |user: u32| async move {
            tokio::time::sleep(Duration::from_millis(20 * u64::from(user))).await;
            match user {
                0 => Err("user 0 does not exist".to_string()),
                n => Ok(format!("profile of user {n}")),
            }
        },
        ActionOptions::new().label("profile"),
    );

    let mut updates = lookup.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            render(&state);
        }
    });

    let _ = lookup.action(1).await;
    let _ = lookup.action(0).await;

    // The first request is slower; its late answer is discarded.
    let slow = lookup.action(5);
    let fast = lookup.action(2);
    let _ = tokio::join!(slow, fast);

    println!("\nFinal snapshot: {:?}", lookup.snapshot());

    drop(lookup);
    let _ = renderer.await;

    println!("\n=== Example Complete ===");
}
