//! Run configuration resolved once at startup.
//!
//! Values come from a `.env`-style `KEY=VALUE` file plus an optional override
//! lookup supplied by the binary (the process environment in practice). Core
//! never reads the environment itself; the resolved `CanvasConfig` is passed
//! down to every component that needs it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::DateRange;
use crate::error::{Error, Result};

pub const KEY_USER_NAME: &str = "GIT_USER_NAME";
pub const KEY_USER_EMAIL: &str = "GIT_USER_EMAIL";
pub const KEY_START_YEAR: &str = "START_YEAR";
pub const KEY_END_YEAR: &str = "END_YEAR";
pub const KEY_SEED: &str = "CANVAS_SEED";
pub const KEY_ARTIFACT: &str = "CANVAS_ARTIFACT";
pub const KEY_AUX_PATHS: &str = "CANVAS_AUX_PATHS";

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_ARTIFACT: &str = "data.txt";
/// The tool's own files, staged into the final commit when present.
pub const DEFAULT_AUX_PATHS: &[&str] = &[
    ".gitignore",
    "README.md",
    "example.env",
    "Cargo.toml",
    "src",
    "tests",
    "benches",
    "crates",
];

/// Parsed `KEY=VALUE` file.
///
/// Blank lines, `#` comments, and lines without `=` are skipped. Keys and
/// values are trimmed. The first definition of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: BTreeMap<String, String>,
}

impl EnvFile {
    pub fn parse(contents: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            entries
                .entry(key.trim().to_string())
                .or_insert_with(|| value.trim().to_string());
        }
        Self { entries }
    }

    /// Read and parse `path`. A missing file yields an empty set so that
    /// overrides alone can still satisfy the required keys.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::IoLike(format!("failed to read {}: {e}", path.display())))?;
        Ok(Self::parse(&contents))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Author/committer display name written to `user.name`.
    pub user_name: String,

    /// Author/committer email written to `user.email`.
    pub user_email: String,

    /// First year of the range (January 1st).
    pub start_year: i32,

    /// Last year of the range (December 31st). Must be `>= start_year`.
    pub end_year: i32,

    /// Optional seed for reproducible timestamp draws. Tokens stay random.
    pub seed: Option<u64>,

    /// Tracked artifact, relative to the working directory.
    pub artifact_path: String,

    /// Auxiliary project files staged into the final commit when present.
    pub aux_paths: Vec<String>,
}

impl CanvasConfig {
    /// Resolve from the env file alone.
    pub fn from_env_file(file: &EnvFile) -> Result<Self> {
        Self::resolve(file, |_| None)
    }

    /// Resolve with `overrides` taking precedence over the file.
    pub fn resolve<F>(file: &EnvFile, overrides: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| -> Option<String> {
            overrides(key)
                .map(|v| v.trim().to_string())
                .or_else(|| file.get(key).map(str::to_string))
                .filter(|v| !v.is_empty())
        };

        let user_name = lookup(KEY_USER_NAME).ok_or_else(|| missing(KEY_USER_NAME))?;
        let user_email = lookup(KEY_USER_EMAIL).ok_or_else(|| missing(KEY_USER_EMAIL))?;
        let start_year = parse_year(KEY_START_YEAR, lookup(KEY_START_YEAR))?;
        let end_year = parse_year(KEY_END_YEAR, lookup(KEY_END_YEAR))?;
        if end_year < start_year {
            return Err(Error::Config(format!(
                "{KEY_END_YEAR} ({end_year}) is before {KEY_START_YEAR} ({start_year})"
            )));
        }

        let seed = match lookup(KEY_SEED) {
            Some(s) => Some(s.parse::<u64>().map_err(|_| {
                Error::Config(format!("{KEY_SEED} must be an unsigned integer, got '{s}'"))
            })?),
            None => None,
        };

        let artifact_path = lookup(KEY_ARTIFACT).unwrap_or_else(|| DEFAULT_ARTIFACT.to_string());

        let aux_paths = match lookup(KEY_AUX_PATHS) {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_AUX_PATHS.iter().map(|p| p.to_string()).collect(),
        };

        Ok(Self {
            user_name,
            user_email,
            start_year,
            end_year,
            seed,
            artifact_path,
            aux_paths,
        })
    }

    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::from_years(self.start_year, self.end_year)
    }
}

fn missing(key: &str) -> Error {
    Error::Config(format!("{key} is missing"))
}

fn parse_year(key: &str, raw: Option<String>) -> Result<i32> {
    let raw = raw.ok_or_else(|| missing(key))?;
    match raw.parse::<i32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(Error::Config(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# operator identity
GIT_USER_NAME = Ada Lovelace
GIT_USER_EMAIL=ada@example.com

START_YEAR=2020
END_YEAR=2021
START_YEAR=1999
not a pair
";

    #[test]
    fn parse_skips_comments_and_keeps_first_definition() {
        let env = EnvFile::parse(SAMPLE);
        assert_eq!(env.len(), 4);
        assert_eq!(env.get("GIT_USER_NAME"), Some("Ada Lovelace"));
        assert_eq!(env.get("START_YEAR"), Some("2020"));
        assert_eq!(env.get("not a pair"), None);
    }

    #[test]
    fn value_may_contain_equals() {
        let env = EnvFile::parse("TOKEN=a=b=c");
        assert_eq!(env.get("TOKEN"), Some("a=b=c"));
    }

    #[test]
    fn resolve_with_defaults() {
        let cfg = CanvasConfig::from_env_file(&EnvFile::parse(SAMPLE)).unwrap();
        assert_eq!(cfg.user_name, "Ada Lovelace");
        assert_eq!(cfg.user_email, "ada@example.com");
        assert_eq!((cfg.start_year, cfg.end_year), (2020, 2021));
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.artifact_path, DEFAULT_ARTIFACT);
        assert_eq!(cfg.aux_paths.len(), DEFAULT_AUX_PATHS.len());
    }

    #[test]
    fn overrides_beat_file() {
        let env = EnvFile::parse(SAMPLE);
        let cfg = CanvasConfig::resolve(&env, |k| match k {
            KEY_END_YEAR => Some("2022".into()),
            KEY_SEED => Some("42".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.end_year, 2022);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.start_year, 2020);
    }

    #[test]
    fn missing_and_invalid_values_are_rejected() {
        let err = CanvasConfig::from_env_file(&EnvFile::parse("GIT_USER_NAME=x")).unwrap_err();
        assert!(err.to_string().contains(KEY_USER_EMAIL));

        let bad_year = "GIT_USER_NAME=x\nGIT_USER_EMAIL=y\nSTART_YEAR=0\nEND_YEAR=2020";
        let err = CanvasConfig::from_env_file(&EnvFile::parse(bad_year)).unwrap_err();
        assert!(err.to_string().contains(KEY_START_YEAR));

        let inverted = "GIT_USER_NAME=x\nGIT_USER_EMAIL=y\nSTART_YEAR=2021\nEND_YEAR=2020";
        assert!(CanvasConfig::from_env_file(&EnvFile::parse(inverted)).is_err());

        let not_a_number = "GIT_USER_NAME=x\nGIT_USER_EMAIL=y\nSTART_YEAR=abc\nEND_YEAR=2020";
        assert!(CanvasConfig::from_env_file(&EnvFile::parse(not_a_number)).is_err());
    }

    #[test]
    fn aux_paths_are_split_and_trimmed() {
        let env = EnvFile::parse(
            "GIT_USER_NAME=x\nGIT_USER_EMAIL=y\nSTART_YEAR=2020\nEND_YEAR=2020\nCANVAS_AUX_PATHS= README.md , ,LICENSE",
        );
        let cfg = CanvasConfig::from_env_file(&env).unwrap();
        assert_eq!(cfg.aux_paths, vec!["README.md".to_string(), "LICENSE".to_string()]);
    }

    #[test]
    fn loading_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, SAMPLE).unwrap();
        let a = CanvasConfig::from_env_file(&EnvFile::load(&path).unwrap()).unwrap();
        let b = CanvasConfig::from_env_file(&EnvFile::load(&path).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::load(&dir.path().join("absent.env")).unwrap();
        assert!(env.is_empty());
    }
}
