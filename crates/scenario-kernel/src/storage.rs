//! Persistence of generated test sources

use std::path::PathBuf;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs;
use tracing::info;

use crate::errors::{KernelError, KernelResult};

pub const SPEC_FILE_SUFFIX: &str = ".cy.ts";

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("file name regex"));

/// `"Login Flow!"` becomes `"login-flow-.cy.ts"`.
pub fn test_file_name(test_name: &str) -> KernelResult<String> {
    let lowered = test_name.to_lowercase();
    if !lowered.chars().any(|ch| ch.is_ascii_alphanumeric()) {
        return Err(KernelError::InvalidTestName(test_name.to_string()));
    }
    let stem = NON_ALNUM_RUN.replace_all(&lowered, "-");
    Ok(format!("{stem}{SPEC_FILE_SUFFIX}"))
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `content` under `file_name`, replacing any previous file.
    async fn save(&self, file_name: &str, content: &str) -> KernelResult<PathBuf>;
}

/// Writes specs into one directory on disk.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    spec_dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(spec_dir: impl Into<PathBuf>) -> Self {
        Self {
            spec_dir: spec_dir.into(),
        }
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn save(&self, file_name: &str, content: &str) -> KernelResult<PathBuf> {
        fs::create_dir_all(&self.spec_dir)
            .await
            .map_err(|err| KernelError::io("create", &self.spec_dir, err))?;

        let path = self.spec_dir.join(file_name);
        fs::write(&path, content)
            .await
            .map_err(|err| KernelError::io("write", &path, err))?;

        info!(path = %path.display(), bytes = content.len(), "saved generated test");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_collapse_non_alphanumeric_runs() {
        assert_eq!(test_file_name("Login Flow").unwrap(), "login-flow.cy.ts");
        assert_eq!(test_file_name("My  Test!!").unwrap(), "my-test-.cy.ts");
        assert_eq!(test_file_name("checkout_v2").unwrap(), "checkout-v2.cy.ts");
        assert_eq!(test_file_name("../etc/passwd").unwrap(), "-etc-passwd.cy.ts");
        assert_eq!(test_file_name("Café au lait").unwrap(), "caf-au-lait.cy.ts");
    }

    #[test]
    fn names_without_alphanumerics_are_rejected() {
        assert!(test_file_name("").is_err());
        assert!(test_file_name(" -- ").is_err());
    }

    #[tokio::test]
    async fn save_creates_directory_and_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(temp.path().join("cypress/e2e"));

        let path = store.save("a.cy.ts", "first").await.unwrap();
        assert_eq!(path, temp.path().join("cypress/e2e/a.cy.ts"));
        store.save("a.cy.ts", "second").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
