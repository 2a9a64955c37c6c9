//! Where and how dumps are written.
//!
//! Defaults are overridden by `pirpy/dump_config.json` found in xdg config
//! directories, which is in turn overridden by environment variables.

use crate::DumpError;
use nanoserde::DeJson;
use std::ffi::OsString;
use std::path::PathBuf;

/// Config file searched for in xdg config directories
pub const CONFIG_FILE: &str = "pirpy/dump_config.json";
/// Directory for dumps, empty disables dumping
pub const DUMP_DIR_VAR: &str = "PIRPY_DUMP_DIR";
/// Number of spaces per level of indentation
pub const INDENT_SIZE_VAR: &str = "PIRPY_INDENT_SIZE";

/// Dump configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DumpConfig {
    /// Output directory, None disables dumping
    pub dir: Option<PathBuf>,
    /// Number of spaces per level of indentation
    pub indent_size: usize,
    /// Extension of dump files, without the dot
    pub extension: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        DumpConfig {
            dir: None,
            indent_size: pirpy_compiler::DEFAULT_INDENT_SIZE,
            extension: String::from("py"),
        }
    }
}

#[derive(DeJson, Debug, Default)]
struct ConfigFile {
    dir: Option<String>,
    indent_size: Option<usize>,
    extension: Option<String>,
}

impl DumpConfig {
    /// Config dumping into dir
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> DumpConfig {
        DumpConfig { dir: Some(dir.into()), ..DumpConfig::default() }
    }

    /// Is dumping enabled?
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    /// Path of dump file for tag, None if dumping is disabled.
    /// Tag is appended to the directory, so absolute tags stay inside it.
    #[must_use]
    pub fn path(&self, tag: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| {
            let mut path = OsString::from(dir.as_os_str());
            path.push("/");
            path.push(tag);
            path.push(".");
            path.push(&self.extension);
            PathBuf::from(path)
        })
    }

    /// Parse config from json. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<DumpConfig, DumpError> {
        let file = ConfigFile::deserialize_json(json).map_err(|e| DumpError::Config(format!("{e}")))?;
        let mut config = DumpConfig::default();
        config.apply_file(file)?;
        Ok(config)
    }

    /// Load config from defaults, config file and environment variables.
    /// Unreadable or invalid config file is skipped.
    #[must_use]
    pub fn load() -> DumpConfig {
        let mut config = DumpConfig::default();
        // Search through config directories and find pirpy/dump_config.json
        let file = xdg::BaseDirectories::new()
            .map_err(|e| log::debug!("Failed to find config directories for {CONFIG_FILE}, {e}"))
            .ok()
            .map(|bd| {
                let mut dirs = bd.get_config_dirs();
                dirs.insert(0, bd.get_config_home());
                dirs
            })
            .and_then(|paths| {
                paths.into_iter().find_map(|mut path| {
                    path.push(CONFIG_FILE);
                    std::fs::read_to_string(&path).ok()
                })
            });
        if let Some(file) = file {
            let parsed = ConfigFile::deserialize_json(&file)
                .map_err(|e| DumpError::Config(format!("{e}")))
                .and_then(|file| config.apply_file(file));
            match parsed {
                Ok(()) => log::debug!("Dump config successfully read and parsed."),
                Err(e) => {
                    log::debug!("Failed to parse {CONFIG_FILE}, {e}, using defaults.");
                    config = DumpConfig::default();
                }
            }
        }
        config.apply_vars(
            std::env::var(DUMP_DIR_VAR).ok().as_deref(),
            std::env::var(INDENT_SIZE_VAR).ok().as_deref(),
        );
        config
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<(), DumpError> {
        if let Some(dir) = file.dir {
            self.dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }
        if let Some(indent_size) = file.indent_size {
            self.indent_size = indent_size;
        }
        if let Some(extension) = file.extension {
            let extension = extension.trim_start_matches('.');
            if extension.is_empty() || extension.contains(['/', '\\']) {
                return Err(DumpError::Config(format!("extension {extension:?} can not be used for dump files")));
            }
            self.extension = extension.into();
        }
        Ok(())
    }

    fn apply_vars(&mut self, dump_dir: Option<&str>, indent_size: Option<&str>) {
        if let Some(dir) = dump_dir {
            self.dir = (!dir.is_empty()).then(|| PathBuf::from(dir));
        }
        if let Some(x) = indent_size {
            match x.parse() {
                Ok(x) => self.indent_size = x,
                Err(e) => log::debug!("Ignoring {INDENT_SIZE_VAR}={x}, {e}"),
            }
        }
    }
}
