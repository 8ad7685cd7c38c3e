//! Reads `config.toml` from the executable's directory (or CWD).
//! Falls back to defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub stages_dir: PathBuf,
    pub default_stage: u32,
    pub log_file: PathBuf,
    pub tick_rate_ms: u64,
    pub editor: EditorConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    pub width: i32,
    pub height: i32,
    pub grid_size: i32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    editor: TomlEditor,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_stages_dir")]
    stages_dir: String,
    #[serde(default = "default_stage")]
    default_stage: u32,
    #[serde(default = "default_log_file")]
    log_file: String,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlEditor {
    #[serde(default = "default_editor_width")]
    width: i32,
    #[serde(default = "default_editor_height")]
    height: i32,
    #[serde(default = "default_grid_size")]
    grid_size: i32,
}

fn default_stages_dir() -> String { "stages".into() }
fn default_stage() -> u32 { 1 }
fn default_log_file() -> String { "sokoban.log".into() }
fn default_tick_rate() -> u64 { 50 }
fn default_editor_width() -> i32 { 10 }
fn default_editor_height() -> i32 { 8 }
fn default_grid_size() -> i32 { 40 }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            stages_dir: default_stages_dir(),
            default_stage: default_stage(),
            log_file: default_log_file(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlEditor {
    fn default() -> Self {
        TomlEditor {
            width: default_editor_width(),
            height: default_editor_height(),
            grid_size: default_grid_size(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            stages_dir: PathBuf::from(toml_cfg.general.stages_dir),
            default_stage: toml_cfg.general.default_stage,
            log_file: PathBuf::from(toml_cfg.general.log_file),
            tick_rate_ms: toml_cfg.display.tick_rate_ms,
            editor: EditorConfig {
                width: toml_cfg.editor.width,
                height: toml_cfg.editor.height,
                grid_size: toml_cfg.editor.grid_size,
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

impl GameConfig {
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        GameConfig::default()
    }

    /// Missing keys fall back to defaults; an unreadable file falls back entirely.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                eprintln!("Warning: {} parse error: {e}", path.display());
                eprintln!("Using default settings.");
                GameConfig::default()
            }),
            Err(e) => {
                eprintln!("Warning: could not read {}: {e}", path.display());
                GameConfig::default()
            }
        }
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg: TomlConfig = toml::from_str(text)?;
        Ok(toml_cfg.into())
    }
}

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
mod test {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(GameConfig::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::parse(
            r#"
[general]
default_stage = 3

[editor]
width = 12
"#,
        )
        .unwrap();
        assert_eq!(cfg.default_stage, 3);
        assert_eq!(cfg.stages_dir, PathBuf::from("stages"));
        assert_eq!(cfg.editor.width, 12);
        assert_eq!(cfg.editor.height, 8);
        assert_eq!(cfg.tick_rate_ms, 50);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        assert!(GameConfig::parse("[display]\ntick_rate_ms = \"fast\"").is_err());
    }
}
