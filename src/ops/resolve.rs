// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Name-to-id resolution for `*_by_name` operations.
//!
//! The index is request-scoped: it is rebuilt from the document on every
//! patch, never cached, because documents mutate between calls.

use std::collections::HashMap;

use crate::model::{Document, ObjectId};

use super::PatchError;

/// Minimum fuzzy-match score (`fuzz::ratio` reports 0.0..=1.0) before a
/// "did you mean" suggestion is offered for an unresolved name.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Case-insensitive lookup from element display names and raw ids to ids.
///
/// Ids are entered first and display names second, so a display name that
/// collides with another element's id wins. Duplicate display names resolve
/// to the element that appears last in document order.
pub struct NameIndex {
    entries: HashMap<String, ObjectId>,
}

impl NameIndex {
    pub fn build(document: &Document) -> Self {
        let mut entries = HashMap::new();
        for element in document.elements() {
            entries.insert(element.id().as_str().to_lowercase(), element.id().clone());
        }
        for element in document.elements() {
            match element.name() {
                Some(name) if !name.is_empty() => {
                    entries.insert(name.to_lowercase(), element.id().clone());
                }
                _ => {}
            }
        }
        Self { entries }
    }

    pub fn resolve(&self, raw: &str) -> Option<ObjectId> {
        self.entries.get(&raw.trim().to_lowercase()).cloned()
    }

    pub fn resolve_or_err(&self, raw: &str) -> Result<ObjectId, PatchError> {
        self.resolve(raw).ok_or_else(|| PatchError::UnresolvedName {
            name: raw.to_owned(),
            suggestion: suggest(&self.entries, raw),
        })
    }
}

/// Case-insensitive lookup from lane names and raw lane ids to lane ids,
/// for `move_to_lane_by_name`. Same precedence rules as [`NameIndex`].
pub struct LaneIndex {
    entries: HashMap<String, ObjectId>,
}

impl LaneIndex {
    pub fn build(document: &Document) -> Self {
        let mut entries = HashMap::new();
        for lane in document.lanes() {
            entries.insert(lane.id().as_str().to_lowercase(), lane.id().clone());
        }
        for lane in document.lanes() {
            if !lane.name().is_empty() {
                entries.insert(lane.name().to_lowercase(), lane.id().clone());
            }
        }
        Self { entries }
    }

    pub fn resolve(&self, raw: &str) -> Option<ObjectId> {
        self.entries.get(&raw.trim().to_lowercase()).cloned()
    }

    pub fn resolve_or_err(&self, raw: &str) -> Result<ObjectId, PatchError> {
        self.resolve(raw).ok_or_else(|| PatchError::UnresolvedName {
            name: raw.to_owned(),
            suggestion: suggest(&self.entries, raw),
        })
    }
}

/// Closest known name or id, if any scores above the threshold.
fn suggest(entries: &HashMap<String, ObjectId>, raw: &str) -> Option<String> {
    let needle = raw.trim().to_lowercase();
    let mut best: Option<(f64, &str)> = None;
    for candidate in entries.keys() {
        let score = rapidfuzz::fuzz::ratio(needle.chars(), candidate.chars());
        if score >= SUGGESTION_THRESHOLD
            && best.map_or(true, |(best_score, _)| score > best_score)
        {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, candidate)| candidate.to_owned())
}
