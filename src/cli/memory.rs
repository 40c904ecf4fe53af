// src/cli/memory.rs — Inspect or clear the persisted memory snapshot

use crate::core::types::MemoryValue;
use crate::infra::config::Config;
use crate::memory::store::{JsonFileStore, SnapshotStore};

/// `distill memory [--clear]`
pub fn run_memory(config: &Config, clear: bool) -> anyhow::Result<()> {
    let store = match config.memory.path.as_deref() {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::open_default(),
    };

    if clear {
        store.clear()?;
        eprintln!("Memory cleared ({})", store.path().display());
        return Ok(());
    }

    let snapshot = store.load()?;
    if snapshot.is_empty() {
        eprintln!("Memory is empty ({})", store.path().display());
        return Ok(());
    }

    for (key, value) in &snapshot {
        match value {
            MemoryValue::Text(text) => println!("{key}: {text}"),
            MemoryValue::List(items) => {
                println!("{key}:");
                for item in items {
                    println!("  - {item}");
                }
            }
        }
    }
    Ok(())
}
