//! Lua-backed configuration
//!
//! The engine's numeric constants and the theme palette live in an optional
//! `war.lua` file that assigns a global `war` table. Every field has a
//! default; only number-valued entries override them, anything else keeps
//! the default and is logged at debug level. A missing file yields pure
//! defaults; a Lua error is a [`war_core::Error::Config`].

mod engine;
mod theme;

pub use engine::EngineConfig;
pub use theme::{hex_to_rgba, Theme};

use std::path::Path;

use mlua::{Lua, Table, Value};
use serde::Serialize;
use tracing::{debug, info};
use war_core::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Config {
    pub engine: EngineConfig,
    pub theme: Theme,
}

impl Config {
    /// Load from a Lua file, or fall back to defaults when `path` is `None`
    /// or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path)?;
        Self::from_lua_source(&source)
    }

    pub fn from_lua_source(source: &str) -> Result<Self> {
        let lua = Lua::new();
        lua.load(source)
            .exec()
            .map_err(|e| Error::Config(format!("lua: {e}")))?;
        let mut config = Self::default();
        let globals = lua.globals();
        match globals.get::<_, Value>("war") {
            Ok(Value::Table(table)) => {
                config.engine.apply_table(&table);
                if let Ok(Value::Table(theme)) = table.get::<_, Value>("theme") {
                    config.theme.apply_table(&theme)?;
                }
            }
            _ => debug!("no `war` table in config"),
        }
        Ok(config)
    }
}

/// Read a numeric field, keeping the default for anything non-numeric.
pub(crate) fn number(table: &Table, key: &str) -> Option<f64> {
    match table.get::<_, Value>(key) {
        Ok(Value::Integer(n)) => Some(n as f64),
        Ok(Value::Number(n)) => Some(n),
        Ok(Value::Nil) | Err(_) => None,
        Ok(other) => {
            debug!(key, value = ?other, "ignoring non-number config value");
            None
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
