//! Counter State Manager
//!
//! This example demonstrates the reducer-style container: actions compute
//! the next whole state, `set` merges a patch directly.
//!
//! Run with: cargo run --example counter_manager

use hookstate::container::StateManager;
use serde_json::{json, Value};

async fn add(state: Value, amount: i64) -> Result<Value, String> {
    let count = state["count"]
        .as_i64()
        .ok_or_else(|| "count is not a number".to_string())?;
    let mut next = state;
    next["count"] = json!(count + amount);
    Ok(next)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    println!("=== Counter State Manager Example ===\n");

    let counter: StateManager<Value, String> = StateManager::new(json!({ "count": 0 }));

    let _ = counter.action(add, 5).await;
    println!("after add(5):       {}", counter.get());

    counter.set(json!({ "flag": true }));
    println!("after set(flag):    {}", counter.get());

    counter.set(json!({ "count": "oops" }));
    let _ = counter.action(add, 1).await;
    println!("after bad add(1):   {}", counter.get());
    if let Some(err) = counter.error() {
        println!("captured error:     {err}");
    }

    println!("\n=== Example Complete ===");
}
