use anyhow::{Context, Result};
use ledgerlift_finance::export::{DEFAULT_PREFIX, DEFAULT_UPDATED_PREFIX};
use ledgerlift_ingest::ExtractLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_results_dir, ensure_ledgerlift_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractLimits,
    pub export: ExportSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Defaults to ~/.ledgerlift/results
    pub results_dir: Option<PathBuf>,
    pub file_prefix: String,
    pub updated_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// EnvFilter directive; RUST_LOG wins when set
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            results_dir: None,
            file_prefix: DEFAULT_PREFIX.to_string(),
            updated_prefix: DEFAULT_UPDATED_PREFIX.to_string(),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// `--out-dir` beats the config file, which beats ~/.ledgerlift/results.
    pub fn results_dir(&self, flag: Option<&Path>) -> Result<PathBuf> {
        match (flag, &self.export.results_dir) {
            (Some(dir), _) => Ok(dir.to_path_buf()),
            (None, Some(dir)) => Ok(dir.clone()),
            (None, None) => default_results_dir(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_ledgerlift_home()?.join("config.toml"))
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    load_config_from(&p)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.export.file_prefix, "expense_tracker");
        assert_eq!(cfg.logging.format, LogFormat::Pretty);
        assert_eq!(cfg.extract, ExtractLimits::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(
            &p,
            "[extract]\nmax_text_bytes = 4096\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.extract.max_text_bytes, 4096);
        assert_eq!(cfg.extract.max_document_bytes, ExtractLimits::default().max_document_bytes);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.export.updated_prefix, "updated_expense_tracker");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.export.results_dir = Some(dir.path().join("out"));
        save_config(&cfg, &p).unwrap();

        let back = load_config_from(&p).unwrap();
        assert_eq!(back.export.results_dir, Some(dir.path().join("out")));
    }

    #[test]
    fn test_results_dir_precedence() {
        let mut cfg = Config::default();
        cfg.export.results_dir = Some(PathBuf::from("/srv/ledger"));
        assert_eq!(
            cfg.results_dir(Some(Path::new("/tmp/x"))).unwrap(),
            PathBuf::from("/tmp/x")
        );
        assert_eq!(cfg.results_dir(None).unwrap(), PathBuf::from("/srv/ledger"));
    }

    #[test]
    fn test_bad_log_format_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[logging]\nformat = \"xml\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
