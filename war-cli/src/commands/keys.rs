//! Headless key-sequence driver
//!
//! Feeds a vim-notation key string through the keymap and editor exactly as
//! an interactive session would, prints the resulting state, and optionally
//! writes the mutated project back out.

use anyhow::{Context, Result};
use std::path::Path;
use war_config::Config;
use war_keymap::parse_sequence;
use war_roll::{Project, Session};

use super::editor_from_config;

pub fn run(
    config: &Config,
    project_path: Option<&Path>,
    keys: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut editor = editor_from_config(config);
    if let Some(path) = project_path {
        Project::load(path)
            .with_context(|| format!("loading {}", path.display()))?
            .install(&mut editor)?;
    }

    let mut session = Session::new(editor)?;
    let events = parse_sequence(keys).with_context(|| format!("parsing keys {keys:?}"))?;
    let mut transport_log = Vec::new();
    for ev in events {
        let applied = session.feed(ev)?;
        if let Some(req) = applied.transport {
            transport_log.push(req);
        }
        if applied.quit {
            break;
        }
    }
    if let Some(req) = session.flush()?.transport {
        transport_log.push(req);
    }

    let editor = &session.editor;
    println!("mode:    {:?}", editor.state.mode);
    println!(
        "cursor:  col {} row {}",
        editor.state.cursor.col_f64(),
        editor.state.cursor.row
    );
    println!("notes:   {}", editor.store.alive_count());
    println!("layers:  {:?}", editor.state.layers.active_layers());
    for req in &transport_log {
        println!("transport: {req:?}");
    }

    if let Some(path) = output {
        Project::from_editor(editor).save(path)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
