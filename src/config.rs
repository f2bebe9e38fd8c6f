/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD), or from
/// an explicit path given on the command line. Falls back to sensible
/// defaults if the file is missing, unreadable, or incomplete.
///
/// Logging is not up yet while the config loads (the log file location
/// lives in the config), so problems are collected in `warnings` and
/// reported by the caller once the subscriber is installed.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::physics::TILE_SIZE;
use crate::domain::rules::Points;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub scoring: ScoreConfig,
    pub lives: u32,
    pub seed: Option<u64>,
    pub log: LogConfig,
    pub gamepad: GamepadConfig,
    pub warnings: Vec<String>,
}

/// Tick rate, actor speeds (pixels per tick) and timer lengths in ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedConfig {
    pub tick_rate_hz: u32,
    pub player_speed: i32,
    pub ghost_speed: i32,
    pub patrol_ticks: u32,
    pub pursuit_ticks: u32,
    pub fright_ticks: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreConfig {
    pub pellet: u32,
    pub power: u32,
    pub ghost: u32,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    pub filter: String,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub quit: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    timers: TomlTimers,
    #[serde(default)]
    scoring: TomlScoring,
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    log: TomlLog,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_hz: u32,
    #[serde(default = "default_actor_speed")]
    player_speed: i32,
    #[serde(default = "default_actor_speed")]
    ghost_speed: i32,
}

#[derive(Deserialize, Debug)]
struct TomlTimers {
    #[serde(default = "default_patrol_secs")]
    patrol_secs: u32,
    #[serde(default = "default_pursuit_secs")]
    pursuit_secs: u32,
    #[serde(default = "default_fright_secs")]
    fright_secs: u32,
}

#[derive(Deserialize, Debug)]
struct TomlScoring {
    #[serde(default = "default_pellet_pts")]
    pellet: u32,
    #[serde(default = "default_power_pts")]
    power: u32,
    #[serde(default = "default_ghost_pts")]
    ghost: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_lives")]
    lives: u32,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_filter")]
    filter: String,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_quit_buttons")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_tick_rate() -> u32 { 60 }
fn default_actor_speed() -> i32 { 2 }
fn default_patrol_secs() -> u32 { 7 }
fn default_pursuit_secs() -> u32 { 20 }
fn default_fright_secs() -> u32 { 7 }
fn default_pellet_pts() -> u32 { 10 }
fn default_power_pts() -> u32 { 50 }
fn default_ghost_pts() -> u32 { 200 }
fn default_lives() -> u32 { 3 }
fn default_log_file() -> String { "mazechase.log".into() }
fn default_log_filter() -> String { "info".into() }
fn default_quit_buttons() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_hz: default_tick_rate(),
            player_speed: default_actor_speed(),
            ghost_speed: default_actor_speed(),
        }
    }
}

impl Default for TomlTimers {
    fn default() -> Self {
        TomlTimers {
            patrol_secs: default_patrol_secs(),
            pursuit_secs: default_pursuit_secs(),
            fright_secs: default_fright_secs(),
        }
    }
}

impl Default for TomlScoring {
    fn default() -> Self {
        TomlScoring {
            pellet: default_pellet_pts(),
            power: default_power_pts(),
            ghost: default_ghost_pts(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { lives: default_lives(), seed: None }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog { file: default_log_file(), filter: default_log_filter() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { quit: default_quit_buttons() }
    }
}

impl Default for SpeedConfig {
    fn default() -> Self {
        let hz = default_tick_rate();
        SpeedConfig {
            tick_rate_hz: hz,
            player_speed: default_actor_speed(),
            ghost_speed: default_actor_speed(),
            patrol_ticks: default_patrol_secs() * hz,
            pursuit_ticks: default_pursuit_secs() * hz,
            fright_ticks: default_fright_secs() * hz,
        }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            pellet: default_pellet_pts(),
            power: default_power_pts(),
            ghost: default_ghost_pts(),
        }
    }
}

impl From<&ScoreConfig> for Points {
    fn from(s: &ScoreConfig) -> Self {
        Points { pellet: s.pellet, power: s.power, ghost: s.ghost }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `explicit` if given, otherwise search for
    /// `config.toml` in the exe directory, then the CWD.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => candidate_dirs()
                .into_iter()
                .map(|d| d.join("config.toml"))
                .find(|p| p.exists()),
        };
        let Some(path) = path else {
            return GameConfig::default();
        };

        match load_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                let mut cfg = GameConfig::default();
                cfg.warnings.push(format!("{e}; using default settings"));
                cfg
            }
        }
    }

    /// Parse a TOML document. Missing keys take their defaults; values
    /// that would break the simulation are replaced and noted in
    /// `warnings`.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: TomlConfig = toml::from_str(text)?;
        Ok(GameConfig::from_toml(raw))
    }

    fn from_toml(raw: TomlConfig) -> Self {
        let mut warnings = Vec::new();

        let hz = if raw.speed.tick_rate_hz == 0 {
            warnings.push("speed.tick_rate_hz must be positive; using 60".to_string());
            default_tick_rate()
        } else {
            raw.speed.tick_rate_hz
        };
        let player_speed = checked_speed("speed.player_speed", raw.speed.player_speed, &mut warnings);
        let ghost_speed = checked_speed("speed.ghost_speed", raw.speed.ghost_speed, &mut warnings);

        GameConfig {
            speed: SpeedConfig {
                tick_rate_hz: hz,
                player_speed,
                ghost_speed,
                patrol_ticks: raw.timers.patrol_secs.saturating_mul(hz),
                pursuit_ticks: raw.timers.pursuit_secs.saturating_mul(hz),
                fright_ticks: raw.timers.fright_secs.saturating_mul(hz),
            },
            scoring: ScoreConfig {
                pellet: raw.scoring.pellet,
                power: raw.scoring.power,
                ghost: raw.scoring.ghost,
            },
            lives: raw.general.lives,
            seed: raw.general.seed,
            log: LogConfig {
                file: PathBuf::from(raw.log.file),
                filter: raw.log.filter,
            },
            gamepad: GamepadConfig { quit: raw.gamepad.quit },
            warnings,
        }
    }
}

/// A speed must divide the tile size, or actors would step over tile
/// centers and ghosts would never get to choose a direction.
fn checked_speed(key: &str, value: i32, warnings: &mut Vec<String>) -> i32 {
    if value > 0 && TILE_SIZE % value == 0 {
        return value;
    }
    let fallback = default_actor_speed();
    warnings.push(format!(
        "{key} = {value} does not evenly divide the tile size {TILE_SIZE}; using {fallback}"
    ));
    fallback
}

fn load_file(path: &Path) -> Result<GameConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    GameConfig::from_toml_str(&text)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = GameConfig::from_toml_str("").expect("empty toml parses");
        assert_eq!(cfg.speed, SpeedConfig::default());
        assert_eq!(cfg.scoring, ScoreConfig::default());
        assert_eq!(Points::from(&cfg.scoring), Points::default());
        assert_eq!(cfg.lives, 3);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.gamepad.quit, vec!["Select".to_string()]);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn default_timers_are_seconds_at_sixty_hz() {
        let s = SpeedConfig::default();
        assert_eq!(s.patrol_ticks, 420);
        assert_eq!(s.pursuit_ticks, 1200);
        assert_eq!(s.fright_ticks, 420);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            "[timers]\nfright_secs = 3\n[speed]\ntick_rate_hz = 30\n[general]\nseed = 42\n",
        )
        .expect("valid toml");
        assert_eq!(cfg.speed.tick_rate_hz, 30);
        assert_eq!(cfg.speed.fright_ticks, 90);
        assert_eq!(cfg.speed.patrol_ticks, 210);
        assert_eq!(cfg.speed.player_speed, 2);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn speeds_that_skip_tile_centers_are_replaced() {
        let cfg = GameConfig::from_toml_str("[speed]\nplayer_speed = 3\nghost_speed = 0\n")
            .expect("valid toml");
        assert_eq!(cfg.speed.player_speed, 2);
        assert_eq!(cfg.speed.ghost_speed, 2);
        assert_eq!(cfg.warnings.len(), 2);

        let ok = GameConfig::from_toml_str("[speed]\nplayer_speed = 4\nghost_speed = 1\n")
            .expect("valid toml");
        assert_eq!(ok.speed.player_speed, 4);
        assert_eq!(ok.speed.ghost_speed, 1);
        assert!(ok.warnings.is_empty());
    }

    #[test]
    fn zero_tick_rate_falls_back() {
        let cfg = GameConfig::from_toml_str("[speed]\ntick_rate_hz = 0\n").expect("valid toml");
        assert_eq!(cfg.speed.tick_rate_hz, 60);
        assert_eq!(cfg.warnings.len(), 1);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = GameConfig::from_toml_str("[speed\nplayer_speed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unreadable_explicit_path_falls_back_with_warning() {
        let cfg = GameConfig::load(Some(Path::new("/definitely/not/here/config.toml")));
        assert_eq!(cfg.speed, SpeedConfig::default());
        assert_eq!(cfg.warnings.len(), 1);
    }
}
