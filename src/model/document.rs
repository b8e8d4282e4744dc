// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use super::element::Element;
use super::flow::Flow;
use super::ids::{ObjectId, ProcessId};
use super::lane::Lane;

/// Process-level metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    id: ProcessId,
    name: Option<String>,
    documentation: Option<String>,
}

impl ProcessInfo {
    pub fn new(id: ProcessId) -> Self {
        Self {
            id,
            name: None,
            documentation: None,
        }
    }

    pub fn new_with(id: ProcessId, name: Option<String>, documentation: Option<String>) -> Self {
        Self {
            id,
            name,
            documentation,
        }
    }

    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name<T: Into<String>>(&mut self, name: Option<T>) {
        self.name = name.map(Into::into);
    }

    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    pub fn set_documentation<T: Into<String>>(&mut self, documentation: Option<T>) {
        self.documentation = documentation.map(Into::into);
    }
}

/// The in-memory BPMN document: one process, its elements, flows, and lanes.
///
/// Elements and flows are kept in insertion order; the linter reports
/// violations in document order, so the order is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    process: ProcessInfo,
    lanes: Vec<Lane>,
    elements: Vec<Element>,
    flows: Vec<Flow>,
}

impl Document {
    pub fn new(process: ProcessInfo) -> Self {
        Self {
            process,
            lanes: Vec::new(),
            elements: Vec::new(),
            flows: Vec::new(),
        }
    }

    pub fn process(&self) -> &ProcessInfo {
        &self.process
    }

    pub fn process_mut(&mut self) -> &mut ProcessInfo {
        &mut self.process
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn flows_mut(&mut self) -> &mut Vec<Flow> {
        &mut self.flows
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lanes_mut(&mut self) -> &mut Vec<Lane> {
        &mut self.lanes
    }

    pub fn element(&self, id: &ObjectId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn element_mut(&mut self, id: &ObjectId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    pub fn flow(&self, id: &ObjectId) -> Option<&Flow> {
        self.flows.iter().find(|flow| flow.id() == id)
    }

    pub fn flow_mut(&mut self, id: &ObjectId) -> Option<&mut Flow> {
        self.flows.iter_mut().find(|flow| flow.id() == id)
    }

    pub fn lane(&self, id: &ObjectId) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.id() == id)
    }

    pub fn lane_mut(&mut self, id: &ObjectId) -> Option<&mut Lane> {
        self.lanes.iter_mut().find(|lane| lane.id() == id)
    }

    pub fn elements_in_lane(&self, lane_id: &ObjectId) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|element| element.lane_id() == Some(lane_id))
            .collect()
    }

    pub fn incoming_flows<'a>(
        &'a self,
        element_id: &'a ObjectId,
    ) -> impl Iterator<Item = &'a Flow> + 'a {
        self.flows.iter().filter(move |flow| flow.target() == element_id)
    }

    pub fn outgoing_flows<'a>(
        &'a self,
        element_id: &'a ObjectId,
    ) -> impl Iterator<Item = &'a Flow> + 'a {
        self.flows.iter().filter(move |flow| flow.source() == element_id)
    }

    /// Scans for references that do not resolve within this document.
    ///
    /// The patch engine and codec refuse to persist/export a document with
    /// dangling references; callers decide whether to repair or reject.
    pub fn dangling_refs(&self) -> Vec<DanglingRef> {
        let element_ids: BTreeSet<&ObjectId> =
            self.elements.iter().map(|element| element.id()).collect();
        let lane_ids: BTreeSet<&ObjectId> = self.lanes.iter().map(|lane| lane.id()).collect();

        let mut dangling = Vec::new();
        for flow in &self.flows {
            if !element_ids.contains(flow.source()) {
                dangling.push(DanglingRef::FlowSource {
                    flow_id: flow.id().clone(),
                    missing: flow.source().clone(),
                });
            }
            if !element_ids.contains(flow.target()) {
                dangling.push(DanglingRef::FlowTarget {
                    flow_id: flow.id().clone(),
                    missing: flow.target().clone(),
                });
            }
        }
        for element in &self.elements {
            if let Some(lane_id) = element.lane_id() {
                if !lane_ids.contains(lane_id) {
                    dangling.push(DanglingRef::ElementLane {
                        element_id: element.id().clone(),
                        missing: lane_id.clone(),
                    });
                }
            }
        }
        dangling
    }
}

/// A reference inside a document that does not resolve to any object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingRef {
    FlowSource { flow_id: ObjectId, missing: ObjectId },
    FlowTarget { flow_id: ObjectId, missing: ObjectId },
    ElementLane { element_id: ObjectId, missing: ObjectId },
}

impl fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlowSource { flow_id, missing } => {
                write!(f, "flow '{flow_id}' references missing source '{missing}'")
            }
            Self::FlowTarget { flow_id, missing } => {
                write!(f, "flow '{flow_id}' references missing target '{missing}'")
            }
            Self::ElementLane {
                element_id,
                missing,
            } => {
                write!(f, "element '{element_id}' references missing lane '{missing}'")
            }
        }
    }
}
