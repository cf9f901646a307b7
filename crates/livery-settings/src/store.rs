//! Settings-store access.

use std::collections::HashMap;
use std::process::Command;

use livery_types::error::{LiveryError, Result};

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// String-valued access to the per-user settings store, keyed by schema and
/// key name. Implementations hold no knowledge of which keys mean what; the
/// typed layer lives in [`crate::desktop`].
pub trait SettingsStore {
    /// Read one key. An absent key is an error.
    fn get(&self, schema: &str, key: &str) -> Result<String>;

    /// Write one key.
    fn set(&mut self, schema: &str, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// gsettings-backed store
// ---------------------------------------------------------------------------

/// The real per-user store, reached through the `gsettings` command-line tool
/// so no GObject bindings are required.
#[derive(Debug, Clone, Copy, Default)]
pub struct GsettingsStore;

impl GsettingsStore {
    pub fn new() -> Self {
        Self
    }
}

impl SettingsStore for GsettingsStore {
    fn get(&self, schema: &str, key: &str) -> Result<String> {
        let output = Command::new("gsettings")
            .args(["get", schema, key])
            .output()?;
        if !output.status.success() {
            return Err(LiveryError::Settings(format!(
                "gsettings get {schema} {key}: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        // gsettings prints GVariant text: 'Theme-Name' -> Theme-Name.
        let value = String::from_utf8_lossy(&output.stdout);
        Ok(value.trim().trim_matches('\'').to_string())
    }

    fn set(&mut self, schema: &str, key: &str, value: &str) -> Result<()> {
        log::debug!("gsettings set {schema} {key} {value}");
        let status = Command::new("gsettings")
            .args(["set", schema, key, value])
            .status()?;
        if !status.success() {
            return Err(LiveryError::Settings(format!(
                "gsettings set {schema} {key} exited with {status}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory store used by tests and `--dry-run`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<(String, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime one key, builder style.
    pub fn with(mut self, schema: &str, key: &str, value: &str) -> Self {
        self.values
            .insert((schema.to_string(), key.to_string()), value.to_string());
        self
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, schema: &str, key: &str) -> Result<String> {
        self.values
            .get(&(schema.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| LiveryError::Settings(format!("no value for {schema} {key}")))
    }

    fn set(&mut self, schema: &str, key: &str, value: &str) -> Result<()> {
        self.values
            .insert((schema.to_string(), key.to_string()), value.to_string());
        Ok(())
    }
}
