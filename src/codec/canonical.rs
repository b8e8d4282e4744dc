// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical JSON rendering.
//!
//! Two semantically equal documents must produce identical bytes here, because
//! the version store hashes this output into the etag. Canonical form means:
//! object keys sorted, no insignificant whitespace, optionals as explicit
//! `null`. Key sorting comes from routing through `serde_json::Value`, whose
//! map is ordered by key.

use serde::Serialize;

use super::json::document_to_json;
use crate::model::Document;

/// Renders the document's wire form as canonical JSON bytes.
pub fn canonical_json(document: &Document) -> Result<String, serde_json::Error> {
    to_canonical_string(&document_to_json(document))
}

/// Canonicalizes any serializable value (used for documents and version
/// payload snapshots alike).
pub fn to_canonical_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::canonical_json;
    use crate::model::fixtures::review_process;

    #[test]
    fn canonical_form_is_stable_across_calls() {
        let document = review_process();
        let first = canonical_json(&document).expect("canonical");
        let second = canonical_json(&document).expect("canonical");
        assert_eq!(first, second);
    }

    #[test]
    fn canonical_form_sorts_keys_and_strips_whitespace() {
        let raw = canonical_json(&review_process()).expect("canonical");
        assert!(!raw.contains('\n'));
        assert!(!raw.contains(": "));
        // Top-level keys in sorted order.
        let elements_at = raw.find("\"elements\"").expect("elements key");
        let flows_at = raw.find("\"flows\"").expect("flows key");
        let lanes_at = raw.find("\"lanes\"").expect("lanes key");
        let process_at = raw.find("\"process\"").expect("process key");
        assert!(elements_at < flows_at && flows_at < lanes_at && lanes_at < process_at);
    }

    #[test]
    fn renamed_document_changes_the_canonical_bytes() {
        let base = canonical_json(&review_process()).expect("canonical");
        let mut renamed = review_process();
        renamed
            .element_mut(&crate::model::ObjectId::new("task_review").expect("id"))
            .expect("element")
            .set_name(Some("Approve"));
        let changed = canonical_json(&renamed).expect("canonical");
        assert_ne!(base, changed);
    }
}
