//! Allowed Role Store
//!
//! Owns the in-memory allow-list. Mutations hold the lock across the file
//! write so concurrent `add`/`remove` calls are serialized and the file always
//! matches memory.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{AllowedRoleSet, RoleId};

use super::StoreError;

/// On-disk shape of the state file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedRolesDocument {
    #[serde(default)]
    pub allowed_roles: Vec<RoleId>,
}

/// Result of reading the state file at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File parsed successfully
    Loaded(AllowedRoleSet),
    /// No file yet (first run)
    Missing,
    /// File exists but could not be read or parsed
    Corrupt(String),
}

impl LoadOutcome {
    /// The set to start with; missing and corrupt files both start empty
    pub fn into_set(self) -> AllowedRoleSet {
        match self {
            LoadOutcome::Loaded(set) => set,
            LoadOutcome::Missing | LoadOutcome::Corrupt(_) => AllowedRoleSet::new(),
        }
    }
}

/// File-backed allow-list shared by all invocations
#[derive(Debug, Clone)]
pub struct AllowedRoleStore {
    path: PathBuf,
    roles: Arc<Mutex<AllowedRoleSet>>,
}

impl AllowedRoleStore {
    /// Open the store, starting empty when the file is missing or corrupt
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let outcome = Self::read(&path).await;
        match &outcome {
            LoadOutcome::Loaded(set) => {
                tracing::info!(path = %path.display(), count = set.len(), "Loaded allowed roles");
            }
            LoadOutcome::Missing => {
                tracing::info!(path = %path.display(), "No state file found, starting with no allowed roles");
            }
            LoadOutcome::Corrupt(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %reason,
                    "State file is unreadable, starting with no allowed roles"
                );
            }
        }

        Self {
            path,
            roles: Arc::new(Mutex::new(outcome.into_set())),
        }
    }

    /// Read and classify the state file without opening a store
    pub async fn read(path: &Path) -> LoadOutcome {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadOutcome::Missing,
            Err(e) => return LoadOutcome::Corrupt(e.to_string()),
        };

        match serde_json::from_slice::<AllowedRolesDocument>(&raw) {
            Ok(doc) => LoadOutcome::Loaded(doc.allowed_roles.into_iter().collect()),
            Err(e) => LoadOutcome::Corrupt(e.to_string()),
        }
    }

    /// Copy of the current set
    pub async fn snapshot(&self) -> AllowedRoleSet {
        self.roles.lock().await.clone()
    }

    pub async fn contains(&self, role: &RoleId) -> bool {
        self.roles.lock().await.contains(role)
    }

    /// Allow a role. Returns false if it was already allowed.
    pub async fn add(&self, role: RoleId) -> Result<bool, StoreError> {
        self.mutate(|set| set.insert(role)).await
    }

    /// Disallow a role. Returns false if it was not allowed.
    pub async fn remove(&self, role: &RoleId) -> Result<bool, StoreError> {
        self.mutate(|set| set.remove(role)).await
    }

    /// Apply `change` to a copy, persist it, then commit it to memory.
    /// A failed write leaves the in-memory set untouched.
    async fn mutate<F>(&self, change: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut AllowedRoleSet) -> bool,
    {
        let mut guard = self.roles.lock().await;
        let mut next = guard.clone();

        if !change(&mut next) {
            return Ok(false);
        }

        self.persist(&next).await?;
        *guard = next;
        Ok(true)
    }

    async fn persist(&self, set: &AllowedRoleSet) -> Result<(), StoreError> {
        let document = AllowedRolesDocument {
            allowed_roles: set.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&document)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp state file");
            }
            return Err(StoreError::io(&self.path, e));
        }

        tracing::debug!(path = %self.path.display(), count = set.len(), "Persisted allowed roles");
        Ok(())
    }
}
