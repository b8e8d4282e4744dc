// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Serialization surfaces: JSON wire format, BPMN 2.0 XML, and the canonical
//! JSON rendering the version store hashes.

pub mod canonical;
pub mod json;
pub mod xml;

use std::fmt;

pub use canonical::{canonical_json, to_canonical_string};
pub use json::{
    document_from_json, document_to_json, export_document_json, parse_document_json, DocumentJson,
    ElementJson, ElementMetaJson, FlowJson, JsonCodecError, LaneJson, ProcessInfoJson,
};
pub use xml::{export_document_xml, parse_document_xml, XmlExportError, XmlParseError};

/// Any failure while moving a document across a serialization boundary.
#[derive(Debug)]
pub enum CodecError {
    Json(JsonCodecError),
    XmlParse(XmlParseError),
    XmlExport(XmlExportError),
    Canonical(serde_json::Error),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(source) => source.fmt(f),
            Self::XmlParse(source) => source.fmt(f),
            Self::XmlExport(source) => source.fmt(f),
            Self::Canonical(source) => write!(f, "cannot canonicalize document: {source}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(source) => Some(source),
            Self::XmlParse(source) => Some(source),
            Self::XmlExport(source) => Some(source),
            Self::Canonical(source) => Some(source),
        }
    }
}

impl From<JsonCodecError> for CodecError {
    fn from(source: JsonCodecError) -> Self {
        Self::Json(source)
    }
}

impl From<XmlParseError> for CodecError {
    fn from(source: XmlParseError) -> Self {
        Self::XmlParse(source)
    }
}

impl From<XmlExportError> for CodecError {
    fn from(source: XmlExportError) -> Self {
        Self::XmlExport(source)
    }
}
