// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document fingerprints for optimistic locking.

use sha2::{Digest, Sha256};

use crate::codec::canonical_json;
use crate::model::Document;

/// SHA-256 over the canonical JSON rendering, hex-encoded.
///
/// Structurally equal documents always fingerprint identically, regardless
/// of how they were produced.
pub fn compute_etag(document: &Document) -> Result<String, serde_json::Error> {
    let canonical = canonical_json(document)?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(format!("{digest:x}"))
}
