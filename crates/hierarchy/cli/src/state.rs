//! Persistent CLI state: the hierarchy plus collected payments

use chrono::{DateTime, Utc};
use hierarchy_runtime::{Hierarchy, PaymentLedger, PricingEngine};
use hierarchy_types::{HierarchyError, InvariantViolation};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SNAPSHOT_VERSION: u32 = 1;

/// Everything the CLI keeps between invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub hierarchy: Hierarchy,
    #[serde(default)]
    pub ledger: PaymentLedger,
}

impl Snapshot {
    pub fn new(hierarchy: Hierarchy) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            hierarchy,
            ledger: PaymentLedger::new(),
        }
    }
}

/// State file errors
#[derive(Debug, Error)]
pub enum StateError {
    #[error("no hierarchy at {0}; run `hierarchy init` first")]
    Missing(PathBuf),

    #[error("hierarchy already exists at {0}; pass --force to replace it")]
    AlreadyExists(PathBuf),

    #[error("unsupported state version {0}")]
    UnsupportedVersion(u32),

    #[error("corrupt state: {0}")]
    Corrupt(#[from] InvariantViolation),

    #[error("corrupt pricing: {0}")]
    Pricing(#[from] HierarchyError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// JSON state file on disk
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and verify a snapshot
    pub fn load(&self) -> Result<Snapshot, StateError> {
        if !self.exists() {
            return Err(StateError::Missing(self.path.clone()));
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|source| self.io(source))?;
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| StateError::Decode {
                path: self.path.clone(),
                source,
            })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StateError::UnsupportedVersion(snapshot.version));
        }
        PricingEngine::new(*snapshot.hierarchy.pricing())?;
        snapshot.hierarchy.check_invariants()?;

        Ok(snapshot)
    }

    /// Write a snapshot, replacing the file atomically
    pub fn save(&self, snapshot: &mut Snapshot) -> Result<(), StateError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| self.io(source))?;
        }

        snapshot.saved_at = Utc::now();
        let encoded = serde_json::to_string_pretty(snapshot).map_err(|source| {
            StateError::Decode {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded).map_err(|source| self.io(source))?;
        std::fs::rename(&tmp, &self.path).map_err(|source| self.io(source))?;

        Ok(())
    }

    fn io(&self, source: std::io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
