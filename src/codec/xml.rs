// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! BPMN 2.0 XML import and export.
//!
//! Import is namespace-tolerant: tags are matched by local name so that
//! `bpmn:userTask`, `userTask`, and vendor prefixes all parse. Export emits
//! the full interchange shape modelers expect: collaboration + participant
//! pool, laneSet with `flowNodeRef`s, `incoming`/`outgoing` references on
//! each node, and a DI section with placeholder geometry (auto-layout in the
//! consuming modeler replaces the zeroed coordinates).

use std::fmt;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::model::{
    DanglingRef, Document, Element, ElementType, Flow, IdError, Lane, ObjectId, ProcessId,
    ProcessInfo,
};
use crate::ops::generated_id;

const BPMN_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
const BPMNDI_NS: &str = "http://www.omg.org/spec/BPMN/20100524/DI";
const OMGDC_NS: &str = "http://www.omg.org/spec/DD/20100524/DC";
const OMGDI_NS: &str = "http://www.omg.org/spec/DD/20100524/DI";
const TARGET_NS: &str = "http://bpmappr.local/bpmn";

const EXPORTER: &str = "Proteus";
const EXPORTER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug)]
pub enum XmlParseError {
    Syntax {
        position: usize,
        source: quick_xml::Error,
    },
    MissingAttribute {
        tag: String,
        attribute: &'static str,
    },
    InvalidId {
        tag: String,
        value: String,
        source: IdError,
    },
    NoProcess,
    Dangling {
        first: DanglingRef,
        total: usize,
    },
}

impl fmt::Display for XmlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { position, source } => {
                write!(f, "malformed XML at byte {position}: {source}")
            }
            Self::MissingAttribute { tag, attribute } => {
                write!(f, "<{tag}> is missing required attribute '{attribute}'")
            }
            Self::InvalidId { tag, value, source } => {
                write!(f, "<{tag}> has invalid id {value:?}: {source}")
            }
            Self::NoProcess => f.write_str("document contains no <process> element"),
            Self::Dangling { first, total } => {
                write!(f, "document has {total} dangling reference(s); first: {first}")
            }
        }
    }
}

impl std::error::Error for XmlParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum XmlExportError {
    Dangling { first: DanglingRef, total: usize },
    Write(quick_xml::Error),
    Encoding(std::string::FromUtf8Error),
}

impl fmt::Display for XmlExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dangling { first, total } => write!(
                f,
                "refusing to export document with {total} dangling reference(s); first: {first}"
            ),
            Self::Write(source) => write!(f, "cannot write XML: {source}"),
            Self::Encoding(source) => write!(f, "exported XML is not valid UTF-8: {source}"),
        }
    }
}

impl std::error::Error for XmlExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dangling { .. } => None,
            Self::Write(source) => Some(source),
            Self::Encoding(source) => Some(source),
        }
    }
}

impl From<quick_xml::Error> for XmlExportError {
    fn from(source: quick_xml::Error) -> Self {
        Self::Write(source)
    }
}

/// What a `Text` event inside the parser belongs to.
enum PendingText {
    FlowNodeRef,
    Documentation,
}

/// Parses BPMN 2.0 XML into a document.
///
/// Node tags are enumerated recursively from the root, so flow nodes nested
/// inside a `subProcess` are flattened into the element list. Tags that do
/// not name a known flow node are skipped. A flow whose `sourceRef` or
/// `targetRef` does not resolve is an error, never silently dropped.
pub fn parse_document_xml(raw: &str) -> Result<Document, XmlParseError> {
    let mut reader = Reader::from_str(raw);
    reader.trim_text(true);

    let mut process: Option<ProcessInfo> = None;
    let mut lanes: Vec<Lane> = Vec::new();
    let mut elements: Vec<Element> = Vec::new();
    let mut flows: Vec<Flow> = Vec::new();

    let mut open_tags: Vec<String> = Vec::new();
    let mut current_lane: Option<Lane> = None;
    let mut pending_text: Option<PendingText> = None;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|source| XmlParseError::Syntax { position, source })?;
        match event {
            Event::Start(ref start) | Event::Empty(ref start) => {
                let tag = local_name(start);
                let is_container = matches!(event, Event::Start(_));
                match tag.as_str() {
                    "process" => {
                        if process.is_none() {
                            process = Some(parse_process(start, position)?);
                        }
                    }
                    "lane" => {
                        let lane = parse_lane(start, position)?;
                        if is_container {
                            current_lane = Some(lane);
                        } else {
                            lanes.push(lane);
                        }
                    }
                    "flowNodeRef" => {
                        if is_container && current_lane.is_some() {
                            pending_text = Some(PendingText::FlowNodeRef);
                        }
                    }
                    "documentation" => {
                        if is_container && open_tags.last().map(String::as_str) == Some("process") {
                            pending_text = Some(PendingText::Documentation);
                        }
                    }
                    "sequenceFlow" => flows.push(parse_flow(start, position)?),
                    _ => {
                        if let Ok(element_type) = tag.parse::<ElementType>() {
                            elements.push(parse_element(start, element_type, position)?);
                        }
                    }
                }
                if is_container {
                    open_tags.push(tag);
                }
            }
            Event::End(ref end) => {
                open_tags.pop();
                let tag = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                match tag.as_str() {
                    "lane" => {
                        if let Some(lane) = current_lane.take() {
                            lanes.push(lane);
                        }
                    }
                    "flowNodeRef" | "documentation" => pending_text = None,
                    _ => {}
                }
            }
            Event::Text(ref text) => {
                let value = text
                    .unescape()
                    .map_err(|source| XmlParseError::Syntax { position, source })?;
                match pending_text {
                    Some(PendingText::FlowNodeRef) => {
                        if let Some(lane) = current_lane.as_mut() {
                            lane.add_child(parse_object_id("flowNodeRef", value.trim(), position)?);
                        }
                    }
                    Some(PendingText::Documentation) => {
                        if let Some(process) = process.as_mut() {
                            process.set_documentation(Some(value.into_owned()));
                        }
                    }
                    None => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let process = process.ok_or(XmlParseError::NoProcess)?;
    let mut document = Document::new(process);

    // Lane membership flows both ways: the lane keeps its ordered children,
    // and each member element gets the lane back-reference.
    for lane in &lanes {
        for child in lane.child_element_ids() {
            if let Some(element) = elements.iter_mut().find(|element| element.id() == child) {
                element.set_lane_id(Some(lane.id().clone()));
            }
        }
    }
    *document.lanes_mut() = lanes;
    *document.elements_mut() = elements;
    *document.flows_mut() = flows;

    let dangling = document.dangling_refs();
    if let Some(first) = dangling.first() {
        return Err(XmlParseError::Dangling {
            first: first.clone(),
            total: dangling.len(),
        });
    }

    Ok(document)
}

fn parse_process(start: &BytesStart<'_>, position: usize) -> Result<ProcessInfo, XmlParseError> {
    let id = required_attr(start, "process", "id", position)?;
    let id: ProcessId = id
        .parse()
        .map_err(|source| XmlParseError::InvalidId {
            tag: "process".to_owned(),
            value: id.clone(),
            source,
        })?;
    let name = optional_attr(start, "name", position)?;
    Ok(ProcessInfo::new_with(id, name, None))
}

fn parse_lane(start: &BytesStart<'_>, position: usize) -> Result<Lane, XmlParseError> {
    let id = required_attr(start, "lane", "id", position)?;
    let id = parse_object_id("lane", &id, position)?;
    let name = optional_attr(start, "name", position)?.unwrap_or_default();
    Ok(Lane::new(id, name))
}

fn parse_element(
    start: &BytesStart<'_>,
    element_type: ElementType,
    position: usize,
) -> Result<Element, XmlParseError> {
    let tag = local_name(start);
    let id = required_attr(start, &tag, "id", position)?;
    let id = parse_object_id(&tag, &id, position)?;
    let name = optional_attr(start, "name", position)?;
    Ok(Element::new_with(id, element_type, name, None))
}

fn parse_flow(start: &BytesStart<'_>, position: usize) -> Result<Flow, XmlParseError> {
    let id = match optional_attr(start, "id", position)? {
        Some(raw) => parse_object_id("sequenceFlow", &raw, position)?,
        None => generated_id("Flow"),
    };
    let source = required_attr(start, "sequenceFlow", "sourceRef", position)?;
    let source = parse_object_id("sequenceFlow", &source, position)?;
    let target = required_attr(start, "sequenceFlow", "targetRef", position)?;
    let target = parse_object_id("sequenceFlow", &target, position)?;
    let name = optional_attr(start, "name", position)?;
    Ok(Flow::new_with(id, source, target, name))
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn optional_attr(
    start: &BytesStart<'_>,
    name: &str,
    position: usize,
) -> Result<Option<String>, XmlParseError> {
    for attr in start.attributes() {
        let attr = attr
            .map_err(quick_xml::Error::from)
            .map_err(|source| XmlParseError::Syntax { position, source })?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|source| XmlParseError::Syntax { position, source })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(
    start: &BytesStart<'_>,
    tag: &str,
    name: &'static str,
    position: usize,
) -> Result<String, XmlParseError> {
    optional_attr(start, name, position)?.ok_or_else(|| XmlParseError::MissingAttribute {
        tag: tag.to_owned(),
        attribute: name,
    })
}

fn parse_object_id(tag: &str, value: &str, _position: usize) -> Result<ObjectId, XmlParseError> {
    ObjectId::new(value).map_err(|source| XmlParseError::InvalidId {
        tag: tag.to_owned(),
        value: value.to_owned(),
        source,
    })
}

/// Serializes the document as BPMN 2.0 interchange XML.
///
/// Synthetic ids (definitions, collaboration, participant, lane set) derive
/// from the process id, so exporting the same document twice yields identical
/// bytes.
pub fn export_document_xml(document: &Document) -> Result<String, XmlExportError> {
    let dangling = document.dangling_refs();
    if let Some(first) = dangling.first() {
        return Err(XmlExportError::Dangling {
            first: first.clone(),
            total: dangling.len(),
        });
    }

    let process_id = document.process().id().as_str();
    let collaboration_id = format!("Collaboration_{process_id}");
    let participant_id = format!("Participant_{process_id}");

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(quick_xml::Error::from)?;

    let mut definitions = BytesStart::new("bpmn:definitions");
    definitions.push_attribute(("xmlns:bpmn", BPMN_NS));
    definitions.push_attribute(("xmlns:bpmndi", BPMNDI_NS));
    definitions.push_attribute(("xmlns:dc", OMGDC_NS));
    definitions.push_attribute(("xmlns:di", OMGDI_NS));
    definitions.push_attribute(("id", format!("Definitions_{process_id}").as_str()));
    definitions.push_attribute(("targetNamespace", TARGET_NS));
    definitions.push_attribute(("exporter", EXPORTER));
    definitions.push_attribute(("exporterVersion", EXPORTER_VERSION));
    writer
        .write_event(Event::Start(definitions))
        .map_err(quick_xml::Error::from)?;

    write_collaboration(&mut writer, document, &collaboration_id, &participant_id)?;
    write_process(&mut writer, document)?;
    write_diagram(&mut writer, document, &collaboration_id, &participant_id)?;

    writer
        .write_event(Event::End(BytesEnd::new("bpmn:definitions")))
        .map_err(quick_xml::Error::from)?;

    String::from_utf8(writer.into_inner()).map_err(XmlExportError::Encoding)
}

fn write_collaboration(
    writer: &mut Writer<Vec<u8>>,
    document: &Document,
    collaboration_id: &str,
    participant_id: &str,
) -> Result<(), XmlExportError> {
    let mut collaboration = BytesStart::new("bpmn:collaboration");
    collaboration.push_attribute(("id", collaboration_id));
    writer
        .write_event(Event::Start(collaboration))
        .map_err(quick_xml::Error::from)?;

    let mut participant = BytesStart::new("bpmn:participant");
    participant.push_attribute(("id", participant_id));
    participant.push_attribute(("name", document.process().name().unwrap_or("Process")));
    participant.push_attribute(("processRef", document.process().id().as_str()));
    writer
        .write_event(Event::Empty(participant))
        .map_err(quick_xml::Error::from)?;

    writer
        .write_event(Event::End(BytesEnd::new("bpmn:collaboration")))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn write_process(writer: &mut Writer<Vec<u8>>, document: &Document) -> Result<(), XmlExportError> {
    let info = document.process();
    let mut process = BytesStart::new("bpmn:process");
    process.push_attribute(("id", info.id().as_str()));
    process.push_attribute(("name", info.name().unwrap_or("Process")));
    process.push_attribute(("isExecutable", "false"));
    writer
        .write_event(Event::Start(process))
        .map_err(quick_xml::Error::from)?;

    if let Some(documentation) = info.documentation() {
        write_text_element(writer, "bpmn:documentation", &[], documentation)?;
    }

    if !document.lanes().is_empty() {
        let mut lane_set = BytesStart::new("bpmn:laneSet");
        let lane_set_id = format!("LaneSet_{}", info.id());
        lane_set.push_attribute(("id", lane_set_id.as_str()));
        writer
            .write_event(Event::Start(lane_set))
            .map_err(quick_xml::Error::from)?;
        for lane in document.lanes() {
            let mut start = BytesStart::new("bpmn:lane");
            start.push_attribute(("id", lane.id().as_str()));
            start.push_attribute(("name", lane.name()));
            writer
                .write_event(Event::Start(start))
                .map_err(quick_xml::Error::from)?;
            for child in lane.child_element_ids() {
                write_text_element(writer, "bpmn:flowNodeRef", &[], child.as_str())?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("bpmn:lane")))
                .map_err(quick_xml::Error::from)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("bpmn:laneSet")))
            .map_err(quick_xml::Error::from)?;
    }

    for element in document.elements() {
        write_node(writer, document, element)?;
    }

    for flow in document.flows() {
        let mut start = BytesStart::new("bpmn:sequenceFlow");
        start.push_attribute(("id", flow.id().as_str()));
        start.push_attribute(("sourceRef", flow.source().as_str()));
        start.push_attribute(("targetRef", flow.target().as_str()));
        if let Some(name) = flow.name() {
            start.push_attribute(("name", name));
        }
        writer
            .write_event(Event::Empty(start))
            .map_err(quick_xml::Error::from)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("bpmn:process")))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    document: &Document,
    element: &Element,
) -> Result<(), XmlExportError> {
    let tag = format!("bpmn:{}", element.element_type().as_tag());
    let mut start = BytesStart::new(tag.as_str());
    start.push_attribute(("id", element.id().as_str()));
    start.push_attribute(("name", element.name().unwrap_or("")));

    let incoming: Vec<&Flow> = document.incoming_flows(element.id()).collect();
    let outgoing: Vec<&Flow> = document.outgoing_flows(element.id()).collect();
    if incoming.is_empty() && outgoing.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(quick_xml::Error::from)?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(quick_xml::Error::from)?;
    for flow in incoming {
        write_text_element(writer, "bpmn:incoming", &[], flow.id().as_str())?;
    }
    for flow in outgoing {
        write_text_element(writer, "bpmn:outgoing", &[], flow.id().as_str())?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag.as_str())))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn write_diagram(
    writer: &mut Writer<Vec<u8>>,
    document: &Document,
    collaboration_id: &str,
    participant_id: &str,
) -> Result<(), XmlExportError> {
    let process_id = document.process().id().as_str();

    let mut diagram = BytesStart::new("bpmndi:BPMNDiagram");
    let diagram_id = format!("BPMNDiagram_{process_id}");
    diagram.push_attribute(("id", diagram_id.as_str()));
    writer
        .write_event(Event::Start(diagram))
        .map_err(quick_xml::Error::from)?;

    let mut plane = BytesStart::new("bpmndi:BPMNPlane");
    let plane_id = format!("BPMNPlane_{process_id}");
    plane.push_attribute(("id", plane_id.as_str()));
    plane.push_attribute(("bpmnElement", collaboration_id));
    writer
        .write_event(Event::Start(plane))
        .map_err(quick_xml::Error::from)?;

    // Pool shape.
    write_shape(writer, participant_id, true, (0, 0, 600, 250))?;
    for lane in document.lanes() {
        write_shape(writer, lane.id().as_str(), false, (30, 0, 570, 250))?;
    }
    for element in document.elements() {
        let (width, height) = shape_size(element.element_type());
        write_shape(writer, element.id().as_str(), false, (0, 0, width, height))?;
    }

    // Placeholder waypoints; auto-layout assigns real geometry downstream.
    for flow in document.flows() {
        let mut edge = BytesStart::new("bpmndi:BPMNEdge");
        let edge_id = format!("BPMNEdge_{}", flow.id());
        edge.push_attribute(("id", edge_id.as_str()));
        edge.push_attribute(("bpmnElement", flow.id().as_str()));
        writer
            .write_event(Event::Start(edge))
            .map_err(quick_xml::Error::from)?;
        for _ in 0..2 {
            let mut waypoint = BytesStart::new("di:waypoint");
            waypoint.push_attribute(("x", "0"));
            waypoint.push_attribute(("y", "0"));
            writer
                .write_event(Event::Empty(waypoint))
                .map_err(quick_xml::Error::from)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("bpmndi:BPMNEdge")))
            .map_err(quick_xml::Error::from)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("bpmndi:BPMNPlane")))
        .map_err(quick_xml::Error::from)?;
    writer
        .write_event(Event::End(BytesEnd::new("bpmndi:BPMNDiagram")))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn write_shape(
    writer: &mut Writer<Vec<u8>>,
    bpmn_element: &str,
    horizontal: bool,
    bounds: (u32, u32, u32, u32),
) -> Result<(), XmlExportError> {
    let mut shape = BytesStart::new("bpmndi:BPMNShape");
    let shape_id = format!("BPMNShape_{bpmn_element}");
    shape.push_attribute(("id", shape_id.as_str()));
    shape.push_attribute(("bpmnElement", bpmn_element));
    if horizontal {
        shape.push_attribute(("isHorizontal", "true"));
    }
    writer
        .write_event(Event::Start(shape))
        .map_err(quick_xml::Error::from)?;

    let (x, y, width, height) = bounds;
    let mut rect = BytesStart::new("dc:Bounds");
    rect.push_attribute(("x", x.to_string().as_str()));
    rect.push_attribute(("y", y.to_string().as_str()));
    rect.push_attribute(("width", width.to_string().as_str()));
    rect.push_attribute(("height", height.to_string().as_str()));
    writer
        .write_event(Event::Empty(rect))
        .map_err(quick_xml::Error::from)?;

    writer
        .write_event(Event::End(BytesEnd::new("bpmndi:BPMNShape")))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<(), XmlExportError> {
    let mut start = BytesStart::new(tag);
    for (key, value) in attributes {
        start.push_attribute((*key, *value));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(quick_xml::Error::from)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(quick_xml::Error::from)?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(quick_xml::Error::from)?;
    Ok(())
}

fn shape_size(element_type: ElementType) -> (u32, u32) {
    if element_type.is_event() {
        (30, 30)
    } else if element_type.is_gateway() {
        (40, 40)
    } else {
        (140, 90)
    }
}

#[cfg(test)]
mod tests {
    use super::{export_document_xml, parse_document_xml, XmlParseError};
    use crate::model::fixtures::{review_process, single_branch_gateway};
    use crate::model::ElementType;

    #[test]
    fn export_then_parse_preserves_elements_and_flows() {
        let document = single_branch_gateway();
        let xml = export_document_xml(&document).expect("export");
        let parsed = parse_document_xml(&xml).expect("parse");

        assert_eq!(parsed.process().id(), document.process().id());
        assert_eq!(parsed.elements().len(), document.elements().len());
        assert_eq!(parsed.flows().len(), document.flows().len());
        assert_eq!(parsed.lanes().len(), 1);
        assert_eq!(parsed.lanes()[0].name(), "Operations");
        // Lane membership survives via flowNodeRef.
        let gateway = parsed
            .element(&crate::model::ObjectId::new("gw_1").expect("id"))
            .expect("gateway");
        assert_eq!(gateway.lane_id().map(AsRef::as_ref), Some("lane_ops"));
    }

    #[test]
    fn export_is_deterministic() {
        let document = review_process();
        let first = export_document_xml(&document).expect("export");
        let second = export_document_xml(&document).expect("export");
        assert_eq!(first, second);
    }

    #[test]
    fn export_contains_collaboration_and_diagram_sections() {
        let xml = export_document_xml(&review_process()).expect("export");
        assert!(xml.contains("<bpmn:collaboration"));
        assert!(xml.contains("processRef=\"Process_review\""));
        assert!(xml.contains("<bpmndi:BPMNDiagram"));
        assert!(xml.contains("bpmnElement=\"Collaboration_Process_review\""));
        assert!(xml.contains("<bpmn:incoming>flow_2</bpmn:incoming>"));
        assert!(xml.contains("<bpmn:outgoing>flow_1</bpmn:outgoing>"));
    }

    #[test]
    fn parse_accepts_unprefixed_tags() {
        let xml = r#"<?xml version="1.0"?>
            <definitions>
              <process id="P1" name="Demo">
                <startEvent id="s" name="Go"/>
                <userTask id="t" name="Check"/>
                <endEvent id="e"/>
                <sequenceFlow id="f1" sourceRef="s" targetRef="t"/>
                <sequenceFlow id="f2" sourceRef="t" targetRef="e"/>
              </process>
            </definitions>"#;
        let document = parse_document_xml(xml).expect("parse");
        assert_eq!(document.process().name(), Some("Demo"));
        assert_eq!(document.elements().len(), 3);
        assert_eq!(
            document.elements()[1].element_type(),
            ElementType::UserTask
        );
        assert_eq!(document.flows().len(), 2);
    }

    #[test]
    fn parse_normalizes_vendor_task_kinds() {
        let xml = r#"<definitions>
              <process id="P1">
                <manualTask id="m" name="Stamp"/>
              </process>
            </definitions>"#;
        let document = parse_document_xml(xml).expect("parse");
        assert_eq!(document.elements()[0].element_type(), ElementType::Task);
    }

    #[test]
    fn parse_rejects_missing_process() {
        let err = parse_document_xml("<definitions/>").unwrap_err();
        assert!(matches!(err, XmlParseError::NoProcess));
    }

    #[test]
    fn parse_rejects_dangling_flow() {
        let xml = r#"<definitions>
              <process id="P1">
                <startEvent id="s"/>
                <sequenceFlow id="f1" sourceRef="s" targetRef="ghost"/>
              </process>
            </definitions>"#;
        let err = parse_document_xml(xml).unwrap_err();
        assert!(matches!(err, XmlParseError::Dangling { total: 1, .. }));
    }

    #[test]
    fn parse_rejects_malformed_xml() {
        let err = parse_document_xml("<definitions><process id=").unwrap_err();
        assert!(matches!(err, XmlParseError::Syntax { .. }));
    }

    #[test]
    fn parse_reports_missing_required_attributes() {
        let xml = r#"<definitions>
              <process id="P1">
                <task name="No Id"/>
              </process>
            </definitions>"#;
        let err = parse_document_xml(xml).unwrap_err();
        assert!(matches!(
            err,
            XmlParseError::MissingAttribute { attribute: "id", .. }
        ));
    }
}
