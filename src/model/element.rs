// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::ids::ObjectId;

/// The kind of a BPMN flow node.
///
/// `ComplexGateway` is recognized so that imports of documents containing one
/// survive parsing and the linter can report it as unsupported; it is not part
/// of the supported editing vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Task,
    UserTask,
    ServiceTask,
    ScriptTask,
    SendTask,
    ReceiveTask,
    StartEvent,
    EndEvent,
    IntermediateCatchEvent,
    IntermediateThrowEvent,
    ExclusiveGateway,
    ParallelGateway,
    InclusiveGateway,
    EventBasedGateway,
    SubProcess,
    ComplexGateway,
}

impl ElementType {
    pub const ALL: [ElementType; 16] = [
        Self::Task,
        Self::UserTask,
        Self::ServiceTask,
        Self::ScriptTask,
        Self::SendTask,
        Self::ReceiveTask,
        Self::StartEvent,
        Self::EndEvent,
        Self::IntermediateCatchEvent,
        Self::IntermediateThrowEvent,
        Self::ExclusiveGateway,
        Self::ParallelGateway,
        Self::InclusiveGateway,
        Self::EventBasedGateway,
        Self::SubProcess,
        Self::ComplexGateway,
    ];

    /// The camelCase BPMN tag/type string, e.g. `userTask`.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::UserTask => "userTask",
            Self::ServiceTask => "serviceTask",
            Self::ScriptTask => "scriptTask",
            Self::SendTask => "sendTask",
            Self::ReceiveTask => "receiveTask",
            Self::StartEvent => "startEvent",
            Self::EndEvent => "endEvent",
            Self::IntermediateCatchEvent => "intermediateCatchEvent",
            Self::IntermediateThrowEvent => "intermediateThrowEvent",
            Self::ExclusiveGateway => "exclusiveGateway",
            Self::ParallelGateway => "parallelGateway",
            Self::InclusiveGateway => "inclusiveGateway",
            Self::EventBasedGateway => "eventBasedGateway",
            Self::SubProcess => "subProcess",
            Self::ComplexGateway => "complexGateway",
        }
    }

    /// Human-readable label used in lint messages, e.g. `Exclusive Gateway`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Task => "Task",
            Self::UserTask => "User Task",
            Self::ServiceTask => "Service Task",
            Self::ScriptTask => "Script Task",
            Self::SendTask => "Send Task",
            Self::ReceiveTask => "Receive Task",
            Self::StartEvent => "Start Event",
            Self::EndEvent => "End Event",
            Self::IntermediateCatchEvent => "Intermediate Catch Event",
            Self::IntermediateThrowEvent => "Intermediate Throw Event",
            Self::ExclusiveGateway => "Exclusive Gateway",
            Self::ParallelGateway => "Parallel Gateway",
            Self::InclusiveGateway => "Inclusive Gateway",
            Self::EventBasedGateway => "Event-Based Gateway",
            Self::SubProcess => "Sub-Process",
            Self::ComplexGateway => "Complex Gateway",
        }
    }

    pub fn is_event(self) -> bool {
        matches!(
            self,
            Self::StartEvent
                | Self::EndEvent
                | Self::IntermediateCatchEvent
                | Self::IntermediateThrowEvent
        )
    }

    pub fn is_gateway(self) -> bool {
        matches!(
            self,
            Self::ExclusiveGateway
                | Self::ParallelGateway
                | Self::InclusiveGateway
                | Self::EventBasedGateway
                | Self::ComplexGateway
        )
    }

    /// Gateways whose fan-out the linter enforces (complex gateways are
    /// rejected wholesale instead).
    pub fn requires_fan_out(self) -> bool {
        matches!(
            self,
            Self::ExclusiveGateway
                | Self::ParallelGateway
                | Self::InclusiveGateway
                | Self::EventBasedGateway
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseElementTypeError {
    value: String,
}

impl ParseElementTypeError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseElementTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown element type '{}'", self.value)
    }
}

impl std::error::Error for ParseElementTypeError {}

impl FromStr for ElementType {
    type Err = ParseElementTypeError;

    /// Accepts bare camelCase tags (`userTask`) and `bpmn:`-prefixed
    /// PascalCase spellings (`bpmn:UserTask`). Unknown `*Task` spellings
    /// normalize to a plain `task`, matching how upstream modelers emit
    /// vendor-specific task kinds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("bpmn:").unwrap_or(s);
        for element_type in Self::ALL {
            if bare.eq_ignore_ascii_case(element_type.as_tag()) {
                return Ok(element_type);
            }
        }
        if bare.to_ascii_lowercase().ends_with("task") {
            return Ok(Self::Task);
        }
        Err(ParseElementTypeError {
            value: s.to_owned(),
        })
    }
}

impl serde::Serialize for ElementType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> serde::Deserialize<'de> for ElementType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Source-artifact traceability attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMeta {
    pub source_artifact_id: Option<String>,
    pub page_number: Option<u32>,
    pub properties: BTreeMap<String, String>,
}

impl ElementMeta {
    pub fn is_empty(&self) -> bool {
        self.source_artifact_id.is_none() && self.page_number.is_none() && self.properties.is_empty()
    }
}

/// A BPMN flow node (task, event, gateway, or sub-process).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ObjectId,
    element_type: ElementType,
    name: Option<String>,
    lane_id: Option<ObjectId>,
    meta: Option<ElementMeta>,
}

impl Element {
    pub fn new(id: ObjectId, element_type: ElementType) -> Self {
        Self {
            id,
            element_type,
            name: None,
            lane_id: None,
            meta: None,
        }
    }

    pub fn new_with(
        id: ObjectId,
        element_type: ElementType,
        name: Option<String>,
        lane_id: Option<ObjectId>,
    ) -> Self {
        Self {
            id,
            element_type,
            name,
            lane_id,
            meta: None,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn set_element_type(&mut self, element_type: ElementType) {
        self.element_type = element_type;
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<T: Into<String>>(&mut self, name: Option<T>) {
        self.name = name.map(Into::into);
    }

    /// Display name for messages: the name when set and non-empty, else the id.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.id.as_str(),
        }
    }

    pub fn lane_id(&self) -> Option<&ObjectId> {
        self.lane_id.as_ref()
    }

    pub fn set_lane_id(&mut self, lane_id: Option<ObjectId>) {
        self.lane_id = lane_id;
    }

    pub fn meta(&self) -> Option<&ElementMeta> {
        self.meta.as_ref()
    }

    pub fn set_meta(&mut self, meta: Option<ElementMeta>) {
        self.meta = meta;
    }

    /// Attaches a key/value pair to the element's metadata property bag,
    /// creating the metadata record on first use.
    pub fn set_meta_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta
            .get_or_insert_with(ElementMeta::default)
            .properties
            .insert(key.into(), value.into());
    }
}
