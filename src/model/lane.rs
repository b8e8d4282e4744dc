// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::ObjectId;

/// A lane groups elements within the process pool (a role or department).
///
/// Membership is recorded twice for BPMN fidelity: the lane's ordered child
/// list drives `flowNodeRef` emission, while `Element::lane_id` is the
/// authoritative back-reference the patch engine maintains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    id: ObjectId,
    name: String,
    child_element_ids: Vec<ObjectId>,
}

impl Lane {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            child_element_ids: Vec::new(),
        }
    }

    pub fn new_with(id: ObjectId, name: impl Into<String>, child_element_ids: Vec<ObjectId>) -> Self {
        Self {
            id,
            name: name.into(),
            child_element_ids,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn child_element_ids(&self) -> &[ObjectId] {
        &self.child_element_ids
    }

    /// Appends an element id, preserving order and ignoring duplicates.
    pub fn add_child(&mut self, element_id: ObjectId) {
        if !self.child_element_ids.contains(&element_id) {
            self.child_element_ids.push(element_id);
        }
    }

    pub fn remove_child(&mut self, element_id: &ObjectId) {
        self.child_element_ids.retain(|id| id != element_id);
    }
}

#[cfg(test)]
mod tests {
    use super::Lane;
    use crate::model::ObjectId;

    #[test]
    fn lane_children_preserve_order_and_dedupe() {
        let lane_id = ObjectId::new("lane_1").expect("lane id");
        let a = ObjectId::new("a").expect("id");
        let b = ObjectId::new("b").expect("id");

        let mut lane = Lane::new(lane_id, "Sales");
        lane.add_child(a.clone());
        lane.add_child(b.clone());
        lane.add_child(a.clone());
        assert_eq!(lane.child_element_ids(), &[a.clone(), b.clone()]);

        lane.remove_child(&a);
        assert_eq!(lane.child_element_ids(), &[b]);
    }
}
