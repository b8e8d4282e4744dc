// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON wire format.
//!
//! The wire shape mirrors the model one-to-one; conversion is pure
//! (de)serialization plus id/type validation. Optional fields are emitted as
//! explicit `null`s so the canonical byte stream (etag input) stays stable.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{
    Document, Element, ElementMeta, ElementType, Flow, IdError, Lane, ObjectId, ProcessId,
    ProcessInfo,
};
use crate::ops::generated_id;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProcessInfoJson {
    pub id: String,
    pub name: Option<String>,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LaneJson {
    pub id: String,
    pub name: String,
    #[serde(rename = "childElementIds", default)]
    pub child_element_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ElementMetaJson {
    #[serde(rename = "sourceArtifactId")]
    pub source_artifact_id: Option<String>,
    #[serde(rename = "pageNumber")]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ElementJson {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub name: Option<String>,
    #[serde(rename = "laneId")]
    pub lane_id: Option<String>,
    pub meta: Option<ElementMetaJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlowJson {
    /// Generated on conversion when absent (external producers may omit it).
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default = "sequence_flow_type")]
    pub flow_type: String,
    pub name: Option<String>,
}

fn sequence_flow_type() -> String {
    "sequenceFlow".to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentJson {
    pub process: ProcessInfoJson,
    #[serde(default)]
    pub lanes: Vec<LaneJson>,
    pub elements: Vec<ElementJson>,
    pub flows: Vec<FlowJson>,
}

#[derive(Debug)]
pub enum JsonCodecError {
    Parse {
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    UnknownElementType {
        element_id: String,
        value: String,
    },
    Dangling {
        first: crate::model::DanglingRef,
        total: usize,
    },
}

impl fmt::Display for JsonCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { source } => write!(f, "cannot parse document JSON: {source}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::UnknownElementType { element_id, value } => {
                write!(f, "element '{element_id}' has unknown type '{value}'")
            }
            Self::Dangling { first, total } => {
                write!(f, "document has {total} dangling reference(s); first: {first}")
            }
        }
    }
}

impl std::error::Error for JsonCodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::UnknownElementType { .. } | Self::Dangling { .. } => None,
        }
    }
}

pub fn document_to_json(document: &Document) -> DocumentJson {
    DocumentJson {
        process: ProcessInfoJson {
            id: document.process().id().to_string(),
            name: document.process().name().map(ToOwned::to_owned),
            documentation: document.process().documentation().map(ToOwned::to_owned),
        },
        lanes: document.lanes().iter().map(lane_to_json).collect(),
        elements: document.elements().iter().map(element_to_json).collect(),
        flows: document.flows().iter().map(flow_to_json).collect(),
    }
}

fn lane_to_json(lane: &Lane) -> LaneJson {
    LaneJson {
        id: lane.id().to_string(),
        name: lane.name().to_owned(),
        child_element_ids: lane
            .child_element_ids()
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

fn element_to_json(element: &Element) -> ElementJson {
    ElementJson {
        id: element.id().to_string(),
        element_type: element.element_type().as_tag().to_owned(),
        name: element.name().map(ToOwned::to_owned),
        lane_id: element.lane_id().map(ToString::to_string),
        meta: element.meta().map(|meta| ElementMetaJson {
            source_artifact_id: meta.source_artifact_id.clone(),
            page_number: meta.page_number,
            properties: meta.properties.clone(),
        }),
    }
}

fn flow_to_json(flow: &Flow) -> FlowJson {
    FlowJson {
        id: Some(flow.id().to_string()),
        source: flow.source().to_string(),
        target: flow.target().to_string(),
        flow_type: sequence_flow_type(),
        name: flow.name().map(ToOwned::to_owned),
    }
}

pub fn document_from_json(json: DocumentJson) -> Result<Document, JsonCodecError> {
    let process_id: ProcessId = parse_id("process.id", json.process.id)?;
    let mut document = Document::new(ProcessInfo::new_with(
        process_id,
        json.process.name,
        json.process.documentation,
    ));

    for lane in json.lanes {
        let lane_id = parse_object_id("lane.id", lane.id)?;
        let mut children = Vec::with_capacity(lane.child_element_ids.len());
        for child in lane.child_element_ids {
            children.push(parse_object_id("lane.childElementIds", child)?);
        }
        document
            .lanes_mut()
            .push(Lane::new_with(lane_id, lane.name, children));
    }

    for element in json.elements {
        let element_id = parse_object_id("element.id", element.id)?;
        let element_type: ElementType =
            element
                .element_type
                .parse()
                .map_err(|_| JsonCodecError::UnknownElementType {
                    element_id: element_id.to_string(),
                    value: element.element_type.clone(),
                })?;
        let lane_id = element
            .lane_id
            .map(|raw| parse_object_id("element.laneId", raw))
            .transpose()?;
        let mut model_element =
            Element::new_with(element_id, element_type, element.name, lane_id);
        if let Some(meta) = element.meta {
            let meta = ElementMeta {
                source_artifact_id: meta.source_artifact_id,
                page_number: meta.page_number,
                properties: meta.properties,
            };
            if !meta.is_empty() {
                model_element.set_meta(Some(meta));
            }
        }
        document.elements_mut().push(model_element);
    }

    for flow in json.flows {
        let flow_id = match flow.id {
            Some(raw) => parse_object_id("flow.id", raw)?,
            None => generated_id("Flow"),
        };
        let source = parse_object_id("flow.source", flow.source)?;
        let target = parse_object_id("flow.target", flow.target)?;
        document
            .flows_mut()
            .push(Flow::new_with(flow_id, source, target, flow.name));
    }

    let dangling = document.dangling_refs();
    if let Some(first) = dangling.first() {
        return Err(JsonCodecError::Dangling {
            first: first.clone(),
            total: dangling.len(),
        });
    }

    Ok(document)
}

pub fn parse_document_json(raw: &str) -> Result<Document, JsonCodecError> {
    let json: DocumentJson =
        serde_json::from_str(raw).map_err(|source| JsonCodecError::Parse { source })?;
    document_from_json(json)
}

pub fn export_document_json(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&document_to_json(document))
}

fn parse_id<T>(field: &'static str, value: String) -> Result<crate::model::Id<T>, JsonCodecError> {
    crate::model::Id::new(value.clone()).map_err(|source| JsonCodecError::InvalidId {
        field,
        value,
        source,
    })
}

fn parse_object_id(field: &'static str, value: String) -> Result<ObjectId, JsonCodecError> {
    parse_id(field, value)
}
