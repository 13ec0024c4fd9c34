/// Engine tuning knobs.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use tracing::warn;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Milliseconds between enemy sweeps.
    pub tick_rate_ms: u64,
    /// Default detection radius for newly spawned enemies, in tiles.
    pub enemy_vision: f64,
    /// Leash radius = vision * leash_factor.
    pub leash_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tick_rate_ms: default_tick_rate(),
            enemy_vision: default_vision(),
            leash_factor: default_leash(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    engine: TomlEngine,
}

#[derive(Deserialize, Debug)]
struct TomlEngine {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_vision")]
    enemy_vision: f64,
    #[serde(default = "default_leash")]
    leash_factor: f64,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 333 }   // three sweeps per second
fn default_vision() -> f64 { 8.0 }
fn default_leash() -> f64 { 1.5 }

impl Default for TomlEngine {
    fn default() -> Self {
        TomlEngine {
            tick_rate_ms: default_tick_rate(),
            enemy_vision: default_vision(),
            leash_factor: default_leash(),
        }
    }
}

// ── Loading ──

impl EngineConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        EngineConfig {
            tick_rate_ms: toml_cfg.engine.tick_rate_ms,
            enemy_vision: toml_cfg.engine.enemy_vision,
            leash_factor: toml_cfg.engine.leash_factor,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!(%err, "config.toml parse error, using defaults");
                        return TomlConfig::default();
                    }
                },
                Err(err) => {
                    warn!(path = %path.display(), %err, "could not read config file");
                }
            }
        }
    }
    TomlConfig::default()
}
