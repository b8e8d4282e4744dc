// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn apply_add_node(
    document: &mut Document,
    element_type: ElementType,
    name: Option<&str>,
    id: Option<ObjectId>,
    lane_id: Option<ObjectId>,
) -> Result<ObjectId, PatchError> {
    let id = match id {
        Some(id) => {
            if id_is_taken(document, &id) {
                return Err(PatchError::AlreadyExists { id });
            }
            id
        }
        None => generated_id(element_type.as_tag()),
    };

    if let Some(lane_id) = &lane_id {
        let lane = document
            .lane_mut(lane_id)
            .ok_or_else(|| PatchError::LaneNotFound {
                id: lane_id.clone(),
            })?;
        lane.add_child(id.clone());
    }

    let mut element = Element::new_with(
        id.clone(),
        element_type,
        name.map(ToOwned::to_owned),
        lane_id,
    );
    if element.name().is_none() {
        element.set_name(Some(""));
    }
    document.elements_mut().push(element);
    Ok(id)
}

fn apply_connect(
    document: &mut Document,
    source_id: &ObjectId,
    target_id: &ObjectId,
    name: Option<&str>,
) -> Result<ObjectId, PatchError> {
    for id in [source_id, target_id] {
        if document.element(id).is_none() {
            return Err(PatchError::UnknownNode { id: (*id).clone() });
        }
    }

    let flow_id = generated_id("Flow");
    document.flows_mut().push(Flow::new_with(
        flow_id.clone(),
        source_id.clone(),
        target_id.clone(),
        name.map(ToOwned::to_owned),
    ));
    Ok(flow_id)
}

/// Removes the element (cascading onto its flows) or flow with this id.
/// A miss is not an error; the document is simply returned unchanged.
fn apply_remove(document: &mut Document, id: &ObjectId) {
    let was_element = document.element(id).is_some();
    document.elements_mut().retain(|element| element.id() != id);
    if was_element {
        document
            .flows_mut()
            .retain(|flow| flow.source() != id && flow.target() != id);
        for lane in document.lanes_mut() {
            lane.remove_child(id);
        }
    }
    document.flows_mut().retain(|flow| flow.id() != id);
}

fn apply_rename(document: &mut Document, id: &ObjectId, name: &str) -> Result<(), PatchError> {
    if let Some(element) = document.element_mut(id) {
        element.set_name(Some(name));
        return Ok(());
    }
    if let Some(flow) = document.flow_mut(id) {
        flow.set_name(Some(name));
        return Ok(());
    }
    Err(PatchError::NotFound { id: id.clone() })
}

fn apply_convert(
    document: &mut Document,
    id: &ObjectId,
    element_type: ElementType,
) -> Result<(), PatchError> {
    let element = document
        .element_mut(id)
        .ok_or_else(|| PatchError::NotFound { id: id.clone() })?;
    element.set_element_type(element_type);
    Ok(())
}

fn apply_move_to_lane(
    document: &mut Document,
    id: &ObjectId,
    lane_id: &ObjectId,
) -> Result<(), PatchError> {
    if document.lane(lane_id).is_none() {
        return Err(PatchError::LaneNotFound {
            id: lane_id.clone(),
        });
    }
    if document.element(id).is_none() {
        return Err(PatchError::NotFound { id: id.clone() });
    }

    // Keep both sides of the membership record in sync.
    for lane in document.lanes_mut() {
        lane.remove_child(id);
    }
    if let Some(lane) = document.lane_mut(lane_id) {
        lane.add_child(id.clone());
    }
    if let Some(element) = document.element_mut(id) {
        element.set_lane_id(Some(lane_id.clone()));
    }
    Ok(())
}

fn apply_set_property(
    document: &mut Document,
    id: &ObjectId,
    key: &str,
    value: &str,
) -> Result<(), PatchError> {
    let element = document
        .element_mut(id)
        .ok_or_else(|| PatchError::NotFound { id: id.clone() })?;
    element.set_meta_property(key, value);
    Ok(())
}

fn id_is_taken(document: &Document, id: &ObjectId) -> bool {
    document.element(id).is_some() || document.flow(id).is_some() || document.lane(id).is_some()
}
