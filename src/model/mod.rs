// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core BPMN document model.
//!
//! A document is one process plus its elements (flow nodes), sequence flows,
//! and lanes. The model is a pure data container; serialization lives in
//! `codec` and mutation in `ops`.

pub mod document;
pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod flow;
pub mod ids;
pub mod lane;

pub use document::{DanglingRef, Document, ProcessInfo};
pub use element::{Element, ElementMeta, ElementType, ParseElementTypeError};
pub use flow::Flow;
pub use ids::{Id, IdError, ObjectId, ProcessId, VersionId};
pub use lane::Lane;
