// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{apply, generated_id, PatchError, PatchOp};
use crate::model::fixtures::{review_process, single_branch_gateway};
use crate::model::{ElementType, Lane, ObjectId};

fn oid(value: &str) -> ObjectId {
    ObjectId::new(value).expect("object id")
}

#[test]
fn add_node_generates_a_typed_id_and_creates_no_flows() {
    let document = review_process();
    let result = apply(
        &document,
        &PatchOp::AddNode {
            element_type: ElementType::UserTask,
            name: Some("Approve".to_owned()),
            id: None,
            lane_id: None,
        },
    )
    .expect("apply");

    assert_eq!(result.summary, "Applied: add_node");
    assert_eq!(result.document.elements().len(), 4);
    assert_eq!(result.document.flows().len(), document.flows().len());

    let created = result.created_id.expect("created id");
    assert!(created.as_str().starts_with("userTask_"));
    let element = result.document.element(&created).expect("new element");
    assert_eq!(element.element_type(), ElementType::UserTask);
    assert_eq!(element.name(), Some("Approve"));
}

#[test]
fn add_node_respects_an_explicit_id() {
    let result = apply(
        &review_process(),
        &PatchOp::AddNode {
            element_type: ElementType::Task,
            name: None,
            id: Some(oid("task_custom")),
            lane_id: None,
        },
    )
    .expect("apply");
    assert_eq!(result.created_id, Some(oid("task_custom")));
}

#[test]
fn add_node_rejects_a_taken_id() {
    let err = apply(
        &review_process(),
        &PatchOp::AddNode {
            element_type: ElementType::Task,
            name: None,
            id: Some(oid("task_review")),
            lane_id: None,
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        PatchError::AlreadyExists {
            id: oid("task_review")
        }
    );
}

#[test]
fn add_node_into_a_lane_records_membership_on_both_sides() {
    let result = apply(
        &single_branch_gateway(),
        &PatchOp::AddNode {
            element_type: ElementType::Task,
            name: Some("Audit".to_owned()),
            id: Some(oid("task_audit")),
            lane_id: Some(oid("lane_ops")),
        },
    )
    .expect("apply");

    let element = result.document.element(&oid("task_audit")).expect("element");
    assert_eq!(element.lane_id(), Some(&oid("lane_ops")));
    let lane = result.document.lane(&oid("lane_ops")).expect("lane");
    assert!(lane.child_element_ids().contains(&oid("task_audit")));
}

#[test]
fn add_node_rejects_a_missing_lane() {
    let err = apply(
        &review_process(),
        &PatchOp::AddNode {
            element_type: ElementType::Task,
            name: None,
            id: None,
            lane_id: Some(oid("lane_ghost")),
        },
    )
    .unwrap_err();
    assert_eq!(
        err,
        PatchError::LaneNotFound {
            id: oid("lane_ghost")
        }
    );
}

#[test]
fn connect_requires_both_endpoints() {
    let err = apply(
        &review_process(),
        &PatchOp::Connect {
            source_id: oid("start_1"),
            target_id: oid("ghost"),
            name: None,
        },
    )
    .unwrap_err();
    assert_eq!(err, PatchError::UnknownNode { id: oid("ghost") });
}

#[test]
fn connect_appends_a_generated_flow() {
    let result = apply(
        &review_process(),
        &PatchOp::Connect {
            source_id: oid("start_1"),
            target_id: oid("end_1"),
            name: Some("skip".to_owned()),
        },
    )
    .expect("apply");

    assert_eq!(result.summary, "Applied: connect");
    let flow_id = result.created_id.expect("flow id");
    assert!(flow_id.as_str().starts_with("Flow_"));
    let flow = result.document.flow(&flow_id).expect("flow");
    assert_eq!(flow.source(), &oid("start_1"));
    assert_eq!(flow.target(), &oid("end_1"));
    assert_eq!(flow.name(), Some("skip"));
}

#[test]
fn remove_element_cascades_onto_its_flows_and_lane_membership() {
    let mut document = single_branch_gateway();
    document
        .lane_mut(&oid("lane_ops"))
        .expect("lane")
        .add_child(oid("gw_1"));

    let result = apply(&document, &PatchOp::Remove { id: oid("gw_1") }).expect("apply");
    assert!(result.document.element(&oid("gw_1")).is_none());
    assert!(result.document.flows().is_empty());
    assert!(result
        .document
        .lane(&oid("lane_ops"))
        .expect("lane")
        .child_element_ids()
        .is_empty());
}

#[test]
fn remove_flow_by_id_removes_only_that_flow() {
    let result = apply(&review_process(), &PatchOp::Remove { id: oid("flow_1") }).expect("apply");
    assert!(result.document.flow(&oid("flow_1")).is_none());
    assert!(result.document.flow(&oid("flow_2")).is_some());
    assert_eq!(result.document.elements().len(), 3);
}

#[test]
fn remove_of_an_unknown_id_is_tolerated() {
    let document = review_process();
    let result = apply(&document, &PatchOp::Remove { id: oid("ghost") }).expect("apply");
    assert_eq!(result.document, document);
}

#[test]
fn rename_reaches_elements_and_flows() {
    let renamed = apply(
        &review_process(),
        &PatchOp::Rename {
            id: oid("task_review"),
            name: "Approve".to_owned(),
        },
    )
    .expect("apply");
    assert_eq!(
        renamed
            .document
            .element(&oid("task_review"))
            .expect("element")
            .name(),
        Some("Approve")
    );

    let renamed_flow = apply(
        &review_process(),
        &PatchOp::Rename {
            id: oid("flow_1"),
            name: "go".to_owned(),
        },
    )
    .expect("apply");
    assert_eq!(
        renamed_flow.document.flow(&oid("flow_1")).expect("flow").name(),
        Some("go")
    );
}

#[test]
fn rename_of_a_missing_id_fails() {
    let err = apply(
        &review_process(),
        &PatchOp::Rename {
            id: oid("ghost"),
            name: "x".to_owned(),
        },
    )
    .unwrap_err();
    assert_eq!(err, PatchError::NotFound { id: oid("ghost") });
}

#[test]
fn convert_changes_only_the_element_type() {
    let document = review_process();
    let result = apply(
        &document,
        &PatchOp::Convert {
            id: oid("task_review"),
            element_type: ElementType::ExclusiveGateway,
        },
    )
    .expect("apply");

    let element = result.document.element(&oid("task_review")).expect("element");
    assert_eq!(element.element_type(), ElementType::ExclusiveGateway);
    assert_eq!(element.name(), Some("Review"));
    assert_eq!(result.document.flows(), document.flows());
}

#[test]
fn move_to_lane_switches_membership() {
    let mut document = single_branch_gateway();
    document
        .lanes_mut()
        .push(Lane::new(oid("lane_qa"), "Quality"));

    let result = apply(
        &document,
        &PatchOp::MoveToLane {
            id: oid("gw_1"),
            lane_id: oid("lane_qa"),
        },
    )
    .expect("apply");

    let element = result.document.element(&oid("gw_1")).expect("element");
    assert_eq!(element.lane_id(), Some(&oid("lane_qa")));
    assert!(result
        .document
        .lane(&oid("lane_ops"))
        .expect("lane")
        .child_element_ids()
        .is_empty());
    assert!(result
        .document
        .lane(&oid("lane_qa"))
        .expect("lane")
        .child_element_ids()
        .contains(&oid("gw_1")));
}

#[test]
fn set_property_lands_in_the_element_meta_bag() {
    let result = apply(
        &review_process(),
        &PatchOp::SetProperty {
            id: oid("task_review"),
            key: "owner".to_owned(),
            value: "sales".to_owned(),
        },
    )
    .expect("apply");

    let meta = result
        .document
        .element(&oid("task_review"))
        .expect("element")
        .meta()
        .expect("meta");
    assert_eq!(meta.properties.get("owner").map(String::as_str), Some("sales"));
}

#[test]
fn noop_returns_a_structurally_equal_document() {
    let document = review_process();
    let result = apply(&document, &PatchOp::Noop {}).expect("apply");
    assert_eq!(result.document, document);
    assert_eq!(result.summary, "Applied: noop");
    assert_eq!(result.created_id, None);
}

#[test]
fn connect_by_name_resolves_before_mutating() {
    let document = review_process();
    let err = apply(
        &document,
        &PatchOp::ConnectByName {
            source_name: "Review".to_owned(),
            target_name: "Nonexistent".to_owned(),
            name: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, PatchError::UnresolvedName { ref name, .. } if name == "Nonexistent"));

    // The failed patch must not have added a half-connected flow.
    let result = apply(
        &document,
        &PatchOp::ConnectByName {
            source_name: "REVIEW".to_owned(),
            target_name: "end_1".to_owned(),
            name: None,
        },
    )
    .expect("apply");
    assert_eq!(result.summary, "Applied: connect");
    assert_eq!(result.document.flows().len(), 3);
}

#[test]
fn by_name_variants_report_their_resolved_op() {
    let result = apply(
        &review_process(),
        &PatchOp::RenameByName {
            old_name: "Review".to_owned(),
            new_name: "Approve".to_owned(),
        },
    )
    .expect("apply");
    assert_eq!(result.summary, "Applied: rename");
    assert_eq!(
        result
            .document
            .element(&oid("task_review"))
            .expect("element")
            .name(),
        Some("Approve")
    );
}

#[test]
fn convert_by_name_accepts_a_raw_id() {
    let result = apply(
        &review_process(),
        &PatchOp::ConvertByName {
            name: "task_review".to_owned(),
            element_type: ElementType::ServiceTask,
        },
    )
    .expect("apply");
    assert_eq!(
        result
            .document
            .element(&oid("task_review"))
            .expect("element")
            .element_type(),
        ElementType::ServiceTask
    );
}

#[test]
fn move_to_lane_by_name_resolves_element_and_lane_names() {
    let document = single_branch_gateway();
    let result = apply(
        &document,
        &PatchOp::MoveToLaneByName {
            name: "Approved?".to_owned(),
            lane_name: "operations".to_owned(),
        },
    )
    .expect("apply");
    assert_eq!(result.summary, "Applied: move_to_lane");
    assert_eq!(
        result
            .document
            .element(&oid("gw_1"))
            .expect("element")
            .lane_id(),
        Some(&oid("lane_ops"))
    );

    // An unknown lane name fails before any mutation.
    let err = apply(
        &document,
        &PatchOp::MoveToLaneByName {
            name: "Approved?".to_owned(),
            lane_name: "Finance".to_owned(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, PatchError::UnresolvedName { ref name, .. } if name == "Finance"));
}

#[test]
fn set_property_by_name_reaches_the_meta_bag() {
    let result = apply(
        &review_process(),
        &PatchOp::SetPropertyByName {
            name: "Review".to_owned(),
            key: "sla".to_owned(),
            value: "48h".to_owned(),
        },
    )
    .expect("apply");
    assert_eq!(result.summary, "Applied: set_property");
    let meta = result
        .document
        .element(&oid("task_review"))
        .expect("element")
        .meta()
        .expect("meta");
    assert_eq!(meta.properties.get("sla").map(String::as_str), Some("48h"));
}

#[test]
fn apply_never_mutates_the_input_document() {
    let document = review_process();
    let snapshot = document.clone();
    let _ = apply(
        &document,
        &PatchOp::Remove {
            id: oid("task_review"),
        },
    )
    .expect("apply");
    assert_eq!(document, snapshot);
}

#[test]
fn generated_ids_have_the_documented_shape() {
    let id: ObjectId = generated_id("task");
    let (prefix, suffix) = id.as_str().split_once('_').expect("separator");
    assert_eq!(prefix, "task");
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn patch_ops_deserialize_from_the_wire_shape() {
    let raw = r#"{"op":"add_node","args":{"type":"bpmn:UserTask","name":"Review","x":200,"y":200}}"#;
    let op: PatchOp = serde_json::from_str(raw).expect("parse");
    assert_eq!(
        op,
        PatchOp::AddNode {
            element_type: ElementType::UserTask,
            name: Some("Review".to_owned()),
            id: None,
            lane_id: None,
        }
    );

    let raw = r#"{"op":"connect_by_name","args":{"sourceName":"Start","targetName":"Review"}}"#;
    let op: PatchOp = serde_json::from_str(raw).expect("parse");
    assert_eq!(
        op,
        PatchOp::ConnectByName {
            source_name: "Start".to_owned(),
            target_name: "Review".to_owned(),
            name: None,
        }
    );

    let raw = r#"{"op":"noop","args":{}}"#;
    let op: PatchOp = serde_json::from_str(raw).expect("parse");
    assert!(op.is_noop());
}
