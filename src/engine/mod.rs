// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The edit engine: interpret, patch, lint, version, export.
//!
//! This is the facade an HTTP layer (or the CLI) talks to. Nothing is
//! persisted until the whole pipeline has succeeded; a failure at any stage
//! leaves the version chain untouched.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::codec::{
    document_from_json, document_to_json, export_document_json, export_document_xml,
    parse_document_xml, CodecError, DocumentJson,
};
use crate::interpret::{summarize_elements, CommandInterpreter, InterpreterError};
use crate::lint::lint;
use crate::model::{Document, VersionId};
use crate::ops::{apply, PatchError};
use crate::version::{
    ChangeType, CommitOptions, ConflictError, GenerationMethod, MemoryVersionStore, Version,
    VersionChain, VersionError, VersionStore,
};

/// What to do when the linter reports violations on an otherwise successful
/// patch. The default keeps the original downgrade-to-warning behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LintPolicy {
    /// Persist the patched document and attach violations as warnings.
    #[default]
    WarnOnly,
    /// Reject the edit; nothing is persisted.
    RejectOnViolation,
}

/// One natural-language edit request. Exactly one of `bpmn`, `bpmnXml`, or
/// `modelVersionId` supplies the document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditRequest {
    pub command: String,
    #[serde(default, rename = "ifMatch")]
    pub if_match: Option<String>,
    #[serde(default)]
    pub bpmn: Option<DocumentJson>,
    #[serde(default, rename = "bpmnXml")]
    pub bpmn_xml: Option<String>,
    #[serde(default, rename = "modelVersionId")]
    pub model_version_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditResponse {
    pub bpmn: DocumentJson,
    #[serde(rename = "versionId")]
    pub version_id: String,
    /// Human-readable change log: `Applied: <op>` followed by one
    /// `Warning: <violation>` per linter finding.
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xml,
    Json,
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Xml, Self::Json, Self::Png];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Png => "png",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "png" => Ok(Self::Png),
            other => Err(EngineError::UnsupportedFormat {
                format: other.to_owned(),
            }),
        }
    }
}

/// Binary-safe export payload.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportPayload {
    /// Base64-encoded file content.
    pub content: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub filename: String,
}

#[derive(Debug)]
pub enum EngineError {
    EmptyCommand,
    MissingSource,
    Codec(CodecError),
    Interpreter(InterpreterError),
    Patch(PatchError),
    Version(VersionError),
    VersionNotFound { id: String },
    LintRejected { violations: Vec<String> },
    UnsupportedFormat { format: String },
    NotImplemented { what: &'static str },
}

impl EngineError {
    /// The structured conflict payload, when this error is a stale-etag
    /// rejection (an HTTP layer maps it to 409).
    pub fn conflict(&self) -> Option<&ConflictError> {
        match self {
            Self::Version(VersionError::Conflict(conflict)) => Some(conflict),
            _ => None,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => f.write_str("command cannot be empty"),
            Self::MissingSource => {
                f.write_str("must provide bpmn, bpmnXml, or modelVersionId")
            }
            Self::Codec(source) => source.fmt(f),
            Self::Interpreter(source) => source.fmt(f),
            Self::Patch(source) => source.fmt(f),
            Self::Version(source) => source.fmt(f),
            Self::VersionNotFound { id } => write!(f, "model version '{id}' not found"),
            Self::LintRejected { violations } => {
                write!(f, "edit rejected by lint policy: {}", violations.join("; "))
            }
            Self::UnsupportedFormat { format } => {
                write!(f, "unsupported export format: {format}")
            }
            Self::NotImplemented { what } => write!(f, "{what} is not implemented"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(source) => Some(source),
            Self::Interpreter(source) => Some(source),
            Self::Patch(source) => Some(source),
            Self::Version(source) => Some(source),
            _ => None,
        }
    }
}

impl From<CodecError> for EngineError {
    fn from(source: CodecError) -> Self {
        Self::Codec(source)
    }
}

impl From<InterpreterError> for EngineError {
    fn from(source: InterpreterError) -> Self {
        Self::Interpreter(source)
    }
}

impl From<PatchError> for EngineError {
    fn from(source: PatchError) -> Self {
        Self::Patch(source)
    }
}

impl From<VersionError> for EngineError {
    fn from(source: VersionError) -> Self {
        Self::Version(source)
    }
}

/// The document edit engine.
pub struct Engine<S = MemoryVersionStore> {
    chain: VersionChain<S>,
    interpreter: CommandInterpreter,
    lint_policy: LintPolicy,
}

impl Engine<MemoryVersionStore> {
    /// Engine with an in-memory version store and the pattern interpreter.
    pub fn in_memory() -> Self {
        Self::new(MemoryVersionStore::new(), CommandInterpreter::pattern())
    }
}

impl<S: VersionStore> Engine<S> {
    pub fn new(store: S, interpreter: CommandInterpreter) -> Self {
        Self {
            chain: VersionChain::new(store),
            interpreter,
            lint_policy: LintPolicy::default(),
        }
    }

    pub fn with_lint_policy(mut self, lint_policy: LintPolicy) -> Self {
        self.lint_policy = lint_policy;
        self
    }

    pub fn chain(&self) -> &VersionChain<S> {
        &self.chain
    }

    /// Runs one edit through the full pipeline:
    /// interpret -> resolve -> patch -> lint -> version.
    pub fn edit(&self, request: EditRequest) -> Result<EditResponse, EngineError> {
        if request.command.trim().is_empty() {
            return Err(EngineError::EmptyCommand);
        }

        let document = self.resolve_source(&request)?;
        let process_id = document.process().id().clone();

        let summaries = summarize_elements(&document);
        let op = self.interpreter.interpret(&request.command, &summaries)?;

        if op.is_noop() {
            log::warn!("could not interpret command: {:?}", request.command);
            return Ok(EditResponse {
                bpmn: document_to_json(&document),
                version_id: request
                    .model_version_id
                    .unwrap_or_else(|| "unchanged".to_owned()),
                changes: vec!["Command not understood".to_owned()],
            });
        }

        let result = apply(&document, &op)?;
        let violations = lint(&result.document);
        if self.lint_policy == LintPolicy::RejectOnViolation && !violations.is_empty() {
            return Err(EngineError::LintRejected { violations });
        }

        let parent_version_id = request
            .model_version_id
            .as_deref()
            .and_then(|raw| VersionId::new(raw).ok());
        let version = self.chain.commit(
            &process_id,
            result.document.clone(),
            GenerationMethod::ManualEdit,
            ChangeType::Minor,
            CommitOptions {
                if_match: request.if_match,
                commit_message: Some(request.command),
                parent_version_id,
                ..CommitOptions::default()
            },
        )?;
        log::info!(
            "applied {} as version {} of process {}",
            op.resolved_name(),
            version.version_number(),
            process_id
        );

        let mut changes = vec![result.summary];
        changes.extend(
            violations
                .into_iter()
                .map(|violation| format!("Warning: {violation}")),
        );

        Ok(EditResponse {
            bpmn: document_to_json(&result.document),
            version_id: version.id().to_string(),
            changes,
        })
    }

    /// Restores an earlier version (forward-only; see the version module).
    pub fn restore(
        &self,
        version_id: &VersionId,
        commit_message: Option<String>,
    ) -> Result<Version, EngineError> {
        let source = self
            .chain
            .find(version_id)
            .ok_or_else(|| EngineError::VersionNotFound {
                id: version_id.to_string(),
            })?;
        let process_id = source.process_id().clone();
        Ok(self.chain.restore(&process_id, version_id, commit_message)?)
    }

    fn resolve_source(&self, request: &EditRequest) -> Result<Document, EngineError> {
        if let Some(bpmn) = &request.bpmn {
            return Ok(document_from_json(bpmn.clone()).map_err(CodecError::from)?);
        }
        if let Some(xml) = &request.bpmn_xml {
            return Ok(parse_document_xml(xml).map_err(CodecError::from)?);
        }
        if let Some(raw_id) = &request.model_version_id {
            let id = VersionId::new(raw_id.as_str()).map_err(|_| EngineError::VersionNotFound {
                id: raw_id.clone(),
            })?;
            let version = self
                .chain
                .find(&id)
                .ok_or_else(|| EngineError::VersionNotFound { id: raw_id.clone() })?;
            return Ok(version.document().clone());
        }
        Err(EngineError::MissingSource)
    }
}

/// Serializes a document for download in the requested format.
pub fn export(document: &Document, format: ExportFormat) -> Result<ExportPayload, EngineError> {
    let process_id = document.process().id();
    match format {
        ExportFormat::Xml => {
            let xml = export_document_xml(document).map_err(CodecError::from)?;
            Ok(ExportPayload {
                content: BASE64.encode(xml),
                mime_type: "application/xml".to_owned(),
                filename: format!("{process_id}.bpmn"),
            })
        }
        ExportFormat::Json => {
            let json = export_document_json(document)
                .map_err(|source| EngineError::Codec(CodecError::Canonical(source)))?;
            Ok(ExportPayload {
                content: BASE64.encode(json),
                mime_type: "application/json".to_owned(),
                filename: format!("{process_id}.json"),
            })
        }
        ExportFormat::Png => Err(EngineError::NotImplemented { what: "PNG export" }),
    }
}

#[cfg(test)]
mod tests {
    use super::{export, Engine, EngineError, ExportFormat};
    use crate::codec::document_to_json;
    use crate::model::fixtures::review_process;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    use super::EditRequest;

    fn edit_request(command: &str) -> EditRequest {
        EditRequest {
            command: command.to_owned(),
            if_match: None,
            bpmn: Some(document_to_json(&review_process())),
            bpmn_xml: None,
            model_version_id: None,
        }
    }

    #[test]
    fn empty_commands_are_rejected() {
        let engine = Engine::in_memory();
        let err = engine.edit(edit_request("   ")).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCommand));
    }

    #[test]
    fn a_request_without_a_document_source_is_rejected() {
        let engine = Engine::in_memory();
        let request = EditRequest {
            command: "add a task called X".to_owned(),
            if_match: None,
            bpmn: None,
            bpmn_xml: None,
            model_version_id: None,
        };
        let err = engine.edit(request).unwrap_err();
        assert!(matches!(err, EngineError::MissingSource));
    }

    #[test]
    fn ununderstood_commands_change_nothing() {
        let engine = Engine::in_memory();
        let response = engine.edit(edit_request("make it prettier")).expect("edit");
        assert_eq!(response.changes, vec!["Command not understood"]);
        assert_eq!(response.version_id, "unchanged");
        assert!(engine.chain().latest(&review_process().process().id().clone()).is_none());
    }

    #[test]
    fn successful_edits_create_a_version_and_log_changes() {
        let engine = Engine::in_memory();
        let response = engine
            .edit(edit_request("add a task called 'Audit'"))
            .expect("edit");
        assert_eq!(response.changes[0], "Applied: add_node");
        assert_eq!(response.bpmn.elements.len(), 4);
        assert_ne!(response.version_id, "unchanged");

        let pid = review_process().process().id().clone();
        let version = engine.chain().latest(&pid).expect("latest version");
        assert_eq!(version.version_number(), 1);
        assert_eq!(version.commit_message(), Some("add a task called 'Audit'"));
    }

    #[test]
    fn lint_findings_become_warnings_by_default() {
        let engine = Engine::in_memory();
        let response = engine
            .edit(edit_request("add a task called 'Island'"))
            .expect("edit");
        assert!(response
            .changes
            .iter()
            .any(|change| change == "Warning: Node 'island' is unreachable (no incoming flows)"));
        assert!(response
            .changes
            .iter()
            .any(|change| change == "Warning: Node 'island' is a dead end (no outgoing flows)"));
    }

    #[test]
    fn reject_policy_blocks_lint_violations() {
        let engine = Engine::in_memory().with_lint_policy(super::LintPolicy::RejectOnViolation);
        let err = engine
            .edit(edit_request("add a task called 'Island'"))
            .unwrap_err();
        assert!(matches!(err, EngineError::LintRejected { .. }));
        let pid = review_process().process().id().clone();
        assert!(engine.chain().latest(&pid).is_none());
    }

    #[test]
    fn xml_export_is_base64_wrapped() {
        let payload = export(&review_process(), ExportFormat::Xml).expect("export");
        assert_eq!(payload.mime_type, "application/xml");
        assert_eq!(payload.filename, "Process_review.bpmn");
        let decoded = BASE64.decode(payload.content).expect("base64");
        let xml = String::from_utf8(decoded).expect("utf8");
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn json_export_round_trips_through_base64() {
        let payload = export(&review_process(), ExportFormat::Json).expect("export");
        assert_eq!(payload.mime_type, "application/json");
        let decoded = BASE64.decode(payload.content).expect("base64");
        let parsed = crate::codec::parse_document_json(
            std::str::from_utf8(&decoded).expect("utf8"),
        )
        .expect("parse");
        assert_eq!(parsed, review_process());
    }

    #[test]
    fn png_export_is_recognized_but_unimplemented() {
        let err = export(&review_process(), ExportFormat::Png).unwrap_err();
        assert!(matches!(err, EngineError::NotImplemented { .. }));

        let err = "svg".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedFormat { .. }));
    }
}
