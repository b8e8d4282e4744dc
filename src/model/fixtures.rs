// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::{Document, ProcessInfo};
use super::element::{Element, ElementType};
use super::flow::Flow;
use super::ids::{ObjectId, ProcessId};
use super::lane::Lane;

fn oid(value: &str) -> ObjectId {
    ObjectId::new(value).expect("object id")
}

/// start → Review → end, fully wired.
pub(crate) fn review_process() -> Document {
    let process_id = ProcessId::new("Process_review").expect("process id");
    let mut document = Document::new(ProcessInfo::new_with(
        process_id,
        Some("Review".to_owned()),
        None,
    ));

    let mut start = Element::new(oid("start_1"), ElementType::StartEvent);
    start.set_name(Some("Start"));
    let mut review = Element::new(oid("task_review"), ElementType::UserTask);
    review.set_name(Some("Review"));
    let mut end = Element::new(oid("end_1"), ElementType::EndEvent);
    end.set_name(Some("End"));

    document.elements_mut().push(start);
    document.elements_mut().push(review);
    document.elements_mut().push(end);
    document
        .flows_mut()
        .push(Flow::new(oid("flow_1"), oid("start_1"), oid("task_review")));
    document
        .flows_mut()
        .push(Flow::new(oid("flow_2"), oid("task_review"), oid("end_1")));

    document
}

/// start → gateway with a single outgoing branch → end, plus one lane.
pub(crate) fn single_branch_gateway() -> Document {
    let process_id = ProcessId::new("Process_gw").expect("process id");
    let mut document = Document::new(ProcessInfo::new(process_id));

    document.lanes_mut().push(Lane::new_with(
        oid("lane_ops"),
        "Operations",
        vec![oid("gw_1")],
    ));

    document
        .elements_mut()
        .push(Element::new(oid("start_1"), ElementType::StartEvent));
    let mut gateway = Element::new(oid("gw_1"), ElementType::ExclusiveGateway);
    gateway.set_name(Some("Approved?"));
    gateway.set_lane_id(Some(oid("lane_ops")));
    document.elements_mut().push(gateway);
    document
        .elements_mut()
        .push(Element::new(oid("end_1"), ElementType::EndEvent));

    document
        .flows_mut()
        .push(Flow::new(oid("flow_1"), oid("start_1"), oid("gw_1")));
    document
        .flows_mut()
        .push(Flow::new(oid("flow_2"), oid("gw_1"), oid("end_1")));

    document
}
