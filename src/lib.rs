// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus — BPMN process editing engine (patch ops + NL commands + versioning).
//!
//! Documents are parsed from JSON or BPMN 2.0 XML, edited through structured
//! patch operations (optionally derived from natural-language commands),
//! linted, and committed to an append-only version chain with optimistic
//! locking.

pub mod codec;
pub mod engine;
pub mod interpret;
pub mod lint;
pub mod model;
pub mod ops;
pub mod version;
