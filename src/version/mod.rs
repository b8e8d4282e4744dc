// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Version chain management.
//!
//! Versions per process form an append-only sequence with one mutable
//! "active" pointer. Number assignment happens inside the store's critical
//! section, so concurrent writers can never share a version number; the
//! optimistic `ifMatch` check on top of that catches semantically stale
//! edits (the caller decided based on outdated content).

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::model::{Document, ProcessId, VersionId};

pub mod etag;

pub use etag::compute_etag;

pub const DEFAULT_AUTHOR: &str = "local-user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    AiGenerated,
    ManualEdit,
    Restored,
}

impl GenerationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AiGenerated => "ai_generated",
            Self::ManualEdit => "manual_edit",
            Self::Restored => "restored",
        }
    }
}

impl fmt::Display for GenerationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Major,
    Minor,
    Patch,
}

/// One immutable version record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    id: VersionId,
    process_id: ProcessId,
    version_number: u32,
    version_label: String,
    commit_message: Option<String>,
    change_type: ChangeType,
    parent_version_id: Option<VersionId>,
    document: Document,
    generation_method: GenerationMethod,
    is_active: bool,
    etag: String,
    created_at: SystemTime,
    created_by: String,
}

impl Version {
    pub fn id(&self) -> &VersionId {
        &self.id
    }

    pub fn process_id(&self) -> &ProcessId {
        &self.process_id
    }

    pub fn version_number(&self) -> u32 {
        self.version_number
    }

    pub fn version_label(&self) -> &str {
        &self.version_label
    }

    pub fn commit_message(&self) -> Option<&str> {
        self.commit_message.as_deref()
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn parent_version_id(&self) -> Option<&VersionId> {
        self.parent_version_id.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn generation_method(&self) -> GenerationMethod {
        self.generation_method
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn etag(&self) -> &str {
        &self.etag
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }
}

/// Everything a caller supplies to append a version; number, label default,
/// etag, and id are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewVersion {
    pub process_id: ProcessId,
    pub document: Document,
    pub generation_method: GenerationMethod,
    pub version_label: Option<String>,
    pub commit_message: Option<String>,
    pub change_type: ChangeType,
    pub parent_version_id: Option<VersionId>,
    pub created_by: String,
    /// The first version of a process activates regardless of this flag.
    pub activate: bool,
}

/// Resolution hints offered to a caller whose edit conflicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionHint {
    Overwrite,
    SaveAsCopy,
    ViewDiff,
}

impl ResolutionHint {
    pub const ALL: [ResolutionHint; 3] = [Self::Overwrite, Self::SaveAsCopy, Self::ViewDiff];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::SaveAsCopy => "save_as_copy",
            Self::ViewDiff => "view_diff",
        }
    }
}

/// Structured payload for an optimistic-lock mismatch (HTTP 409 at the edge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictError {
    pub message: String,
    pub your_etag: String,
    pub current_etag: String,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<SystemTime>,
    pub options: Vec<ResolutionHint>,
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (your etag {}, current etag {})",
            self.message, self.your_etag, self.current_etag
        )
    }
}

#[derive(Debug)]
pub enum VersionError {
    Conflict(Box<ConflictError>),
    VersionNotFound { id: VersionId },
    Canonical(serde_json::Error),
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict(conflict) => conflict.fmt(f),
            Self::VersionNotFound { id } => write!(f, "version '{id}' not found"),
            Self::Canonical(source) => write!(f, "cannot fingerprint document: {source}"),
        }
    }
}

impl std::error::Error for VersionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canonical(source) => Some(source),
            _ => None,
        }
    }
}

/// Persistence contract for version records.
///
/// The single non-negotiable requirement on implementors: `append` assigns
/// version numbers atomically per process id (read latest, assign next,
/// write, optionally flip the active pointer, all in one critical section).
pub trait VersionStore: Send + Sync {
    fn find(&self, id: &VersionId) -> Option<Version>;
    fn latest(&self, process_id: &ProcessId) -> Option<Version>;
    fn active(&self, process_id: &ProcessId) -> Option<Version>;
    /// All versions of the process, newest first.
    fn list(&self, process_id: &ProcessId) -> Vec<Version>;
    fn set_active(&self, process_id: &ProcessId, id: &VersionId) -> Result<Version, VersionError>;
    fn append(&self, new_version: NewVersion) -> Result<Version, VersionError>;
}

#[derive(Default)]
struct StoreInner {
    versions: Vec<Version>,
    active: HashMap<ProcessId, VersionId>,
    sequence: u64,
}

/// In-memory store; a single mutex is the serialization point for numbering.
#[derive(Default)]
pub struct MemoryVersionStore {
    inner: Mutex<StoreInner>,
}

impl MemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        // A poisoned lock means another writer panicked mid-append; the data
        // itself is still a consistent append-only log.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl VersionStore for MemoryVersionStore {
    fn find(&self, id: &VersionId) -> Option<Version> {
        let inner = self.lock();
        inner
            .versions
            .iter()
            .find(|version| version.id() == id)
            .cloned()
    }

    fn latest(&self, process_id: &ProcessId) -> Option<Version> {
        let inner = self.lock();
        inner
            .versions
            .iter()
            .filter(|version| version.process_id() == process_id)
            .max_by_key(|version| version.version_number())
            .cloned()
    }

    fn active(&self, process_id: &ProcessId) -> Option<Version> {
        let inner = self.lock();
        let active_id = inner.active.get(process_id)?.clone();
        inner
            .versions
            .iter()
            .find(|version| version.id() == &active_id)
            .cloned()
    }

    fn list(&self, process_id: &ProcessId) -> Vec<Version> {
        let inner = self.lock();
        let mut versions: Vec<Version> = inner
            .versions
            .iter()
            .filter(|version| version.process_id() == process_id)
            .cloned()
            .collect();
        versions.sort_by(|a, b| b.version_number().cmp(&a.version_number()));
        versions
    }

    fn set_active(&self, process_id: &ProcessId, id: &VersionId) -> Result<Version, VersionError> {
        let mut inner = self.lock();
        let found = inner
            .versions
            .iter()
            .any(|version| version.id() == id && version.process_id() == process_id);
        if !found {
            return Err(VersionError::VersionNotFound { id: id.clone() });
        }

        let mut activated = None;
        for version in inner
            .versions
            .iter_mut()
            .filter(|version| version.process_id() == process_id)
        {
            version.is_active = version.id() == id;
            if version.is_active {
                activated = Some(version.clone());
            }
        }
        inner.active.insert(process_id.clone(), id.clone());
        Ok(activated.unwrap_or_else(|| unreachable!("presence checked above")))
    }

    fn append(&self, new_version: NewVersion) -> Result<Version, VersionError> {
        let etag = compute_etag(&new_version.document).map_err(VersionError::Canonical)?;

        let mut inner = self.lock();
        let version_number = inner
            .versions
            .iter()
            .filter(|version| version.process_id() == &new_version.process_id)
            .map(Version::version_number)
            .max()
            .map_or(1, |max| max + 1);

        inner.sequence += 1;
        let id = VersionId::new(format!("ver_{:08x}", inner.sequence))
            .unwrap_or_else(|_| unreachable!("sequential ids are valid tokens"));

        let is_active = new_version.activate || version_number == 1;
        let version = Version {
            id: id.clone(),
            process_id: new_version.process_id.clone(),
            version_number,
            version_label: new_version
                .version_label
                .unwrap_or_else(|| format!("v{version_number}")),
            commit_message: new_version.commit_message,
            change_type: new_version.change_type,
            parent_version_id: new_version.parent_version_id,
            document: new_version.document,
            generation_method: new_version.generation_method,
            is_active,
            etag,
            created_at: SystemTime::now(),
            created_by: new_version.created_by,
        };

        if is_active {
            for existing in inner
                .versions
                .iter_mut()
                .filter(|existing| existing.process_id() == &new_version.process_id)
            {
                existing.is_active = false;
            }
            inner.active.insert(new_version.process_id.clone(), id);
        }
        inner.versions.push(version.clone());
        Ok(version)
    }
}

/// Caller-facing options for committing a new version.
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Optimistic-lock fingerprint; when present and stale, the commit is
    /// rejected and no version is created.
    pub if_match: Option<String>,
    pub version_label: Option<String>,
    pub commit_message: Option<String>,
    pub parent_version_id: Option<VersionId>,
    pub created_by: Option<String>,
    pub activate: bool,
}

/// Orchestrates commits and restores over a [`VersionStore`].
pub struct VersionChain<S> {
    store: S,
}

impl<S: VersionStore> VersionChain<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find(&self, id: &VersionId) -> Option<Version> {
        self.store.find(id)
    }

    pub fn latest(&self, process_id: &ProcessId) -> Option<Version> {
        self.store.latest(process_id)
    }

    pub fn active(&self, process_id: &ProcessId) -> Option<Version> {
        self.store.active(process_id)
    }

    /// All versions of the process, newest first.
    pub fn list(&self, process_id: &ProcessId) -> Vec<Version> {
        self.store.list(process_id)
    }

    /// Moves the active pointer to an existing version without creating a
    /// new one. Contrast with [`VersionChain::restore`], which appends.
    pub fn activate(
        &self,
        process_id: &ProcessId,
        version_id: &VersionId,
    ) -> Result<Version, VersionError> {
        self.store.set_active(process_id, version_id)
    }

    /// Commits a document as the next version of the process.
    pub fn commit(
        &self,
        process_id: &ProcessId,
        document: Document,
        generation_method: GenerationMethod,
        change_type: ChangeType,
        options: CommitOptions,
    ) -> Result<Version, VersionError> {
        if let Some(if_match) = &options.if_match {
            if let Some(latest) = self.store.latest(process_id) {
                if latest.etag() != if_match {
                    return Err(VersionError::Conflict(Box::new(ConflictError {
                        message: "Process changed since you started editing.".to_owned(),
                        your_etag: if_match.clone(),
                        current_etag: latest.etag().to_owned(),
                        last_modified_by: Some(latest.created_by().to_owned()),
                        last_modified_at: Some(latest.created_at()),
                        options: ResolutionHint::ALL.to_vec(),
                    })));
                }
            }
        }

        self.store.append(NewVersion {
            process_id: process_id.clone(),
            document,
            generation_method,
            version_label: options.version_label,
            commit_message: options.commit_message,
            change_type,
            parent_version_id: options.parent_version_id,
            created_by: options
                .created_by
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_owned()),
            activate: options.activate,
        })
    }

    /// Restores an earlier version by appending a new one.
    ///
    /// The new version copies the source document, parents onto the current
    /// active version (not the source), is marked `restored`, and becomes
    /// active immediately. History is never rewritten.
    pub fn restore(
        &self,
        process_id: &ProcessId,
        version_id: &VersionId,
        commit_message: Option<String>,
    ) -> Result<Version, VersionError> {
        let source = self
            .store
            .find(version_id)
            .filter(|version| version.process_id() == process_id)
            .ok_or_else(|| VersionError::VersionNotFound {
                id: version_id.clone(),
            })?;

        let parent = self.store.active(process_id).map(|active| active.id().clone());
        let message = commit_message
            .unwrap_or_else(|| format!("Restored to version {}", source.version_number()));

        self.store.append(NewVersion {
            process_id: process_id.clone(),
            document: source.document().clone(),
            generation_method: GenerationMethod::Restored,
            version_label: None,
            commit_message: Some(message),
            change_type: ChangeType::Major,
            parent_version_id: parent,
            created_by: DEFAULT_AUTHOR.to_owned(),
            activate: true,
        })
    }
}
