// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Patch operations on documents.
//!
//! A patch is one structured operation. `apply` is pure: it resolves every
//! name reference up front, clones the document, mutates the clone, and
//! returns it. The input document is never touched, so a failed patch leaves
//! the caller's state exactly as it was.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{Document, Element, ElementType, Flow, Id, ObjectId};

pub mod resolve;

use resolve::{LaneIndex, NameIndex};

/// One structured patch operation in wire form.
///
/// `*_by_name` variants address objects by display name (or raw id) and are
/// resolved through [`NameIndex`] before application. Unknown wire fields
/// (for example layout hints like `x`/`y`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum PatchOp {
    AddNode {
        #[serde(rename = "type")]
        element_type: ElementType,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        id: Option<ObjectId>,
        #[serde(default, rename = "laneId")]
        lane_id: Option<ObjectId>,
    },
    Connect {
        #[serde(rename = "sourceId")]
        source_id: ObjectId,
        #[serde(rename = "targetId")]
        target_id: ObjectId,
        #[serde(default)]
        name: Option<String>,
    },
    ConnectByName {
        #[serde(rename = "sourceName")]
        source_name: String,
        #[serde(rename = "targetName")]
        target_name: String,
        #[serde(default)]
        name: Option<String>,
    },
    Remove {
        id: ObjectId,
    },
    RemoveByName {
        name: String,
    },
    Rename {
        id: ObjectId,
        name: String,
    },
    RenameByName {
        #[serde(rename = "oldName")]
        old_name: String,
        #[serde(rename = "newName")]
        new_name: String,
    },
    Convert {
        id: ObjectId,
        #[serde(rename = "type")]
        element_type: ElementType,
    },
    ConvertByName {
        name: String,
        #[serde(rename = "type")]
        element_type: ElementType,
    },
    MoveToLane {
        id: ObjectId,
        #[serde(rename = "laneId")]
        lane_id: ObjectId,
    },
    MoveToLaneByName {
        name: String,
        #[serde(rename = "laneName")]
        lane_name: String,
    },
    SetProperty {
        id: ObjectId,
        key: String,
        value: String,
    },
    SetPropertyByName {
        name: String,
        key: String,
        value: String,
    },
    Noop {},
}

impl PatchOp {
    /// The wire name of this operation after name resolution; `*_by_name`
    /// variants report their id-addressed counterpart, matching the change
    /// log a caller sees.
    pub fn resolved_name(&self) -> &'static str {
        match self {
            Self::AddNode { .. } => "add_node",
            Self::Connect { .. } | Self::ConnectByName { .. } => "connect",
            Self::Remove { .. } | Self::RemoveByName { .. } => "remove",
            Self::Rename { .. } | Self::RenameByName { .. } => "rename",
            Self::Convert { .. } | Self::ConvertByName { .. } => "convert",
            Self::MoveToLane { .. } | Self::MoveToLaneByName { .. } => "move_to_lane",
            Self::SetProperty { .. } | Self::SetPropertyByName { .. } => "set_property",
            Self::Noop {} => "noop",
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop {})
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// `connect` referenced an element id that does not exist.
    UnknownNode { id: ObjectId },
    /// An id-addressed operation found neither an element nor a flow.
    NotFound { id: ObjectId },
    /// The target lane of `add_node`/`move_to_lane` does not exist.
    LaneNotFound { id: ObjectId },
    /// `add_node` was given an explicit id that is already taken.
    AlreadyExists { id: ObjectId },
    /// A `*_by_name` reference resolved to nothing.
    UnresolvedName {
        name: String,
        suggestion: Option<String>,
    },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { id } => write!(f, "unknown node '{id}'"),
            Self::NotFound { id } => write!(f, "no element or flow with id '{id}'"),
            Self::LaneNotFound { id } => write!(f, "no lane with id '{id}'"),
            Self::AlreadyExists { id } => write!(f, "an object with id '{id}' already exists"),
            Self::UnresolvedName { name, suggestion } => {
                write!(f, "could not resolve '{name}'")?;
                if let Some(suggestion) = suggestion {
                    write!(f, "; did you mean '{suggestion}'?")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PatchError {}

/// Outcome of a successful patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    pub document: Document,
    /// Human-readable change summary, e.g. `Applied: connect`.
    pub summary: String,
    /// Id of the element or flow the operation created, if any.
    pub created_id: Option<ObjectId>,
}

/// Applies one operation to the document, returning the patched copy.
///
/// Name resolution happens in full before any mutation: an operation naming
/// two objects where only one resolves fails without side effects.
pub fn apply(document: &Document, op: &PatchOp) -> Result<PatchResult, PatchError> {
    let resolved = resolve_op(document, op)?;
    let mut next = document.clone();
    let created_id = match &resolved {
        PatchOp::AddNode {
            element_type,
            name,
            id,
            lane_id,
        } => Some(apply_add_node(
            &mut next,
            *element_type,
            name.as_deref(),
            id.clone(),
            lane_id.clone(),
        )?),
        PatchOp::Connect {
            source_id,
            target_id,
            name,
        } => Some(apply_connect(
            &mut next,
            source_id,
            target_id,
            name.as_deref(),
        )?),
        PatchOp::Remove { id } => {
            apply_remove(&mut next, id);
            None
        }
        PatchOp::Rename { id, name } => {
            apply_rename(&mut next, id, name)?;
            None
        }
        PatchOp::Convert { id, element_type } => {
            apply_convert(&mut next, id, *element_type)?;
            None
        }
        PatchOp::MoveToLane { id, lane_id } => {
            apply_move_to_lane(&mut next, id, lane_id)?;
            None
        }
        PatchOp::SetProperty { id, key, value } => {
            apply_set_property(&mut next, id, key, value)?;
            None
        }
        PatchOp::Noop {} => None,
        // resolve_op rewrote these into their id-addressed counterparts.
        PatchOp::ConnectByName { .. }
        | PatchOp::RemoveByName { .. }
        | PatchOp::RenameByName { .. }
        | PatchOp::ConvertByName { .. }
        | PatchOp::MoveToLaneByName { .. }
        | PatchOp::SetPropertyByName { .. } => unreachable!("by-name op survived resolution"),
    };

    Ok(PatchResult {
        document: next,
        summary: format!("Applied: {}", resolved.resolved_name()),
        created_id,
    })
}

/// Rewrites `*_by_name` operations into id-addressed ones via the
/// case-insensitive name index. Id-addressed operations pass through.
fn resolve_op(document: &Document, op: &PatchOp) -> Result<PatchOp, PatchError> {
    match op {
        PatchOp::ConnectByName {
            source_name,
            target_name,
            name,
        } => {
            let index = NameIndex::build(document);
            let source_id = index.resolve_or_err(source_name)?;
            let target_id = index.resolve_or_err(target_name)?;
            Ok(PatchOp::Connect {
                source_id,
                target_id,
                name: name.clone(),
            })
        }
        PatchOp::RemoveByName { name } => {
            let id = NameIndex::build(document).resolve_or_err(name)?;
            Ok(PatchOp::Remove { id })
        }
        PatchOp::RenameByName { old_name, new_name } => {
            let id = NameIndex::build(document).resolve_or_err(old_name)?;
            Ok(PatchOp::Rename {
                id,
                name: new_name.clone(),
            })
        }
        PatchOp::ConvertByName { name, element_type } => {
            let id = NameIndex::build(document).resolve_or_err(name)?;
            Ok(PatchOp::Convert {
                id,
                element_type: *element_type,
            })
        }
        PatchOp::MoveToLaneByName { name, lane_name } => {
            let id = NameIndex::build(document).resolve_or_err(name)?;
            let lane_id = LaneIndex::build(document).resolve_or_err(lane_name)?;
            Ok(PatchOp::MoveToLane { id, lane_id })
        }
        PatchOp::SetPropertyByName { name, key, value } => {
            let id = NameIndex::build(document).resolve_or_err(name)?;
            Ok(PatchOp::SetProperty {
                id,
                key: key.clone(),
                value: value.clone(),
            })
        }
        other => Ok(other.clone()),
    }
}

/// Generates a fresh id with the shape `{prefix}_{8 hex chars}`.
pub fn generated_id<T>(prefix: &str) -> Id<T> {
    let token: u32 = rand::thread_rng().gen();
    let value = format!("{prefix}_{token:08x}");
    Id::new(value).unwrap_or_else(|_| unreachable!("generated ids are valid tokens"))
}

// Extracted op-application implementation.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
