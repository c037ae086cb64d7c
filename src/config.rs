//! Environment configuration.
//!
//! Values come from the process environment, with a `.env` file honoured
//! when present. Nothing here is required: every setting has a local default
//! rooted in the instance directory.

use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_INSTANCE_DIR: &str = "instance";
const MODEL_FILE: &str = "sentiment_classifier.pkl";
const VECTORIZER_FILE: &str = "tfidf_vectorizer.pkl";
const DATABASE_FILE: &str = "database.db";

/// Paths of a trained model and its matching text vectorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifacts {
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
}

impl ModelArtifacts {
    pub fn new(model_path: impl Into<PathBuf>, vectorizer_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            vectorizer_path: vectorizer_path.into(),
        }
    }

    /// True only when both files exist.
    pub fn available(&self) -> bool {
        self.model_path.is_file() && self.vectorizer_path.is_file()
    }

    /// True when at least one of the files exists.
    pub fn partially_present(&self) -> bool {
        self.model_path.exists() || self.vectorizer_path.exists()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub instance_dir: PathBuf,
    /// Connection string for the storage layer consuming classifier output
    pub database_url: String,
    pub artifacts: ModelArtifacts,
    /// Full valence lexicon; the built-in one is used when unset
    pub vader_lexicon_path: Option<PathBuf>,
}

impl Config {
    /// Read configuration from the environment after loading `.env`.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let instance_dir = var("INSTANCE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INSTANCE_DIR));

        let database_url = match var("DATABASE_URL") {
            Some(url) => normalize_db_url(&url),
            None => format!("sqlite://{}", instance_dir.join(DATABASE_FILE).display()),
        };

        let artifacts = ModelArtifacts::new(
            var("ML_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| instance_dir.join(MODEL_FILE)),
            var("TFIDF_VECTORIZER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| instance_dir.join(VECTORIZER_FILE)),
        );

        Self {
            database_url,
            artifacts,
            vader_lexicon_path: var("VADER_LEXICON_PATH").map(PathBuf::from),
            instance_dir,
        }
    }

    /// Create the instance directory if it does not exist yet.
    pub fn ensure_instance_dir(&self) -> Result<&Path> {
        if self.instance_dir.exists() && !self.instance_dir.is_dir() {
            return Err(Error::Config(format!(
                "Instance path {} exists and is not a directory",
                self.instance_dir.display()
            )));
        }
        std::fs::create_dir_all(&self.instance_dir)?;
        Ok(self.instance_dir.as_path())
    }
}

/// Hosted Postgres providers hand out `postgres://` URLs; drivers expect
/// the `postgresql://` scheme.
pub fn normalize_db_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.instance_dir, PathBuf::from("instance"));
        assert_eq!(
            config.artifacts.model_path,
            PathBuf::from("instance").join("sentiment_classifier.pkl")
        );
        assert_eq!(
            config.artifacts.vectorizer_path,
            PathBuf::from("instance").join("tfidf_vectorizer.pkl")
        );
        assert!(config.database_url.starts_with("sqlite://"));
        assert!(config.database_url.ends_with("database.db"));
        assert!(config.vader_lexicon_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("INSTANCE_DIR", "/srv/reviews"),
            ("DATABASE_URL", "postgres://user:pw@db:5432/reviews"),
            ("ML_MODEL_PATH", "/models/clf.pkl"),
            ("VADER_LEXICON_PATH", "/data/vader_lexicon.txt"),
        ]));
        assert_eq!(config.database_url, "postgresql://user:pw@db:5432/reviews");
        assert_eq!(config.artifacts.model_path, PathBuf::from("/models/clf.pkl"));
        assert_eq!(
            config.artifacts.vectorizer_path,
            PathBuf::from("/srv/reviews/tfidf_vectorizer.pkl")
        );
        assert_eq!(
            config.vader_lexicon_path,
            Some(PathBuf::from("/data/vader_lexicon.txt"))
        );
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("INSTANCE_DIR", "  "),
            ("VADER_LEXICON_PATH", ""),
        ]));
        assert_eq!(config.instance_dir, PathBuf::from("instance"));
        assert!(config.vader_lexicon_path.is_none());
    }

    #[test]
    fn test_normalize_db_url() {
        assert_eq!(normalize_db_url("postgres://a@b/c"), "postgresql://a@b/c");
        assert_eq!(normalize_db_url("postgresql://a@b/c"), "postgresql://a@b/c");
        assert_eq!(normalize_db_url("sqlite:///tmp/x.db"), "sqlite:///tmp/x.db");
        // only the scheme is rewritten
        assert_eq!(
            normalize_db_url("postgres://postgres://x"),
            "postgresql://postgres://x"
        );
    }

    #[test]
    fn test_artifact_detection() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ModelArtifacts::new(dir.path().join("m.pkl"), dir.path().join("v.pkl"));
        assert!(!artifacts.available());
        assert!(!artifacts.partially_present());

        std::fs::write(&artifacts.model_path, b"model").unwrap();
        assert!(!artifacts.available());
        assert!(artifacts.partially_present());

        std::fs::write(&artifacts.vectorizer_path, b"vectorizer").unwrap();
        assert!(artifacts.available());
    }

    #[test]
    fn test_ensure_instance_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("instance");
        let lookup = lookup_from(&[("INSTANCE_DIR", nested.to_str().unwrap())]);
        let config = Config::from_lookup(lookup);
        assert_eq!(config.ensure_instance_dir().unwrap(), nested.as_path());
        assert!(nested.is_dir());

        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let lookup = lookup_from(&[("INSTANCE_DIR", file.to_str().unwrap())]);
        let config = Config::from_lookup(lookup);
        assert!(matches!(config.ensure_instance_dir(), Err(Error::Config(_))));
    }
}
