// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared benchmark fixtures: synthetic process documents of fixed sizes.

use proteus::model::{Document, Element, ElementType, Flow, Lane, ObjectId, ProcessId, ProcessInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// 3 nodes, the smallest meaningful process.
    Small,
    /// 50 tasks in sequence with two lanes.
    Medium,
    /// 500 tasks with gateways sprinkled in.
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn task_count(self) -> usize {
        match self {
            Self::Small => 1,
            Self::Medium => 50,
            Self::Large => 500,
        }
    }
}

fn oid(value: String) -> ObjectId {
    ObjectId::new(value).expect("fixture id")
}

/// Builds `start -> task_0 -> .. -> task_{n-1} -> end` with every tenth task
/// replaced by an exclusive gateway, split across two lanes.
pub fn document(case: Case) -> Document {
    let process_id = ProcessId::new(format!("Process_bench_{}", case.id())).expect("process id");
    let mut document = Document::new(ProcessInfo::new(process_id));

    let count = case.task_count();
    let mut node_ids = Vec::with_capacity(count + 2);

    let start = oid("start_1".to_owned());
    let mut element = Element::new(start.clone(), ElementType::StartEvent);
    element.set_name(Some("Start"));
    document.elements_mut().push(element);
    node_ids.push(start);

    for index in 0..count {
        let id = oid(format!("node_{index:04}"));
        let element_type = if index > 0 && index % 10 == 0 {
            ElementType::ExclusiveGateway
        } else {
            ElementType::Task
        };
        let mut element = Element::new(id.clone(), element_type);
        element.set_name(Some(format!("Step {index}")));
        document.elements_mut().push(element);
        node_ids.push(id);
    }

    let end = oid("end_1".to_owned());
    let mut element = Element::new(end.clone(), ElementType::EndEvent);
    element.set_name(Some("End"));
    document.elements_mut().push(element);
    node_ids.push(end);

    for (index, pair) in node_ids.windows(2).enumerate() {
        document.flows_mut().push(Flow::new(
            oid(format!("flow_{index:04}")),
            pair[0].clone(),
            pair[1].clone(),
        ));
    }
    // Gateways get a second outgoing branch so the fixture lints clean.
    for (index, id) in node_ids.iter().enumerate() {
        if document
            .element(id)
            .is_some_and(|element| element.element_type() == ElementType::ExclusiveGateway)
        {
            document.flows_mut().push(Flow::new(
                oid(format!("flow_branch_{index:04}")),
                id.clone(),
                node_ids[node_ids.len() - 1].clone(),
            ));
        }
    }

    if case != Case::Small {
        let half = node_ids.len() / 2;
        document.lanes_mut().push(Lane::new_with(
            oid("lane_front".to_owned()),
            "Front office",
            node_ids[..half].to_vec(),
        ));
        document.lanes_mut().push(Lane::new_with(
            oid("lane_back".to_owned()),
            "Back office",
            node_ids[half..].to_vec(),
        ));
    }

    document
}
