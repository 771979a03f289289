//! Replay command implementation.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use metacore_core::{Config, EventData, MetaCore};
use tracing::{info, warn};

use crate::trace::{ScriptedHost, load_trace};

/// Run the replay command
pub fn run(trace: &Path, config: Option<&Path>, summary: bool, quiet: bool) -> Result<()> {
    let config = match config {
        Some(path) => match Config::load(path) {
            Ok(config) => {
                info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    let calls = load_trace(trace).with_context(|| format!("reading trace {:?}", trace))?;
    info!("Replaying {} host calls", calls.len());

    let mut core = MetaCore::new(config);
    let broadcasts = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&broadcasts);
    core.bus_mut().subscribe_all(move |event| {
        counter.set(counter.get() + 1);
        if quiet {
            return;
        }
        match event.data {
            EventData::None => println!("{}", event.kind),
            EventData::Button(button) => println!("{} {:?}", event.kind, button),
            EventData::Int(value) => println!("{} {}", event.kind, value),
        }
    });

    let mut host = ScriptedHost::new();
    for call in &calls {
        host.apply(&mut core, call);
    }
    info!(
        "Replay finished: {} calls, {} events",
        calls.len(),
        broadcasts.get()
    );

    if summary {
        match core.last_summary() {
            Some(summary) => println!("{}", serde_json::to_string_pretty(summary)?),
            None => println!("No level finished"),
        }
    }
    Ok(())
}
