//! Repository configuration (`.rift.toml`).
//!
//! Typed configuration read from the repository root. Missing fields use
//! sensible defaults; a missing file means all defaults (no error). Unknown
//! fields are rejected so typos surface instead of silently doing nothing.

use std::path::Path;

use serde::Deserialize;

use crate::error::RiftError;

/// Name of the config file at the repository root.
pub const CONFIG_FILE: &str = ".rift.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level rift configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiftConfig {
    /// Rejection preview settings.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Resolution behaviour settings.
    #[serde(default)]
    pub resolve: ResolveConfig,
}

impl RiftConfig {
    /// Load the config from `root`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    /// [`RiftError::Config`] if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, RiftError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| RiftError::Config {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| RiftError::Config {
            path,
            detail: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// PreviewConfig
// ---------------------------------------------------------------------------

/// Rejection preview settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
    /// Render a rejection preview after each resolution (default: `true`).
    #[serde(default = "default_preview_enabled")]
    pub enabled: bool,

    /// Unchanged context lines shown around changes (default: `1`).
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: default_preview_enabled(),
            context_lines: default_context_lines(),
        }
    }
}

const fn default_preview_enabled() -> bool {
    true
}

const fn default_context_lines() -> usize {
    1
}

// ---------------------------------------------------------------------------
// ResolveConfig
// ---------------------------------------------------------------------------

/// Resolution behaviour settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Stage the file in git when `rift done` accepts it (default: `true`).
    /// When disabled, `done` only writes the file.
    #[serde(default = "default_stage_on_done")]
    pub stage_on_done: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            stage_on_done: default_stage_on_done(),
        }
    }
}

const fn default_stage_on_done() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
