// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural linter.
//!
//! A pure function over a document: no state, no I/O, safe to call from any
//! thread. Violations come back as human-readable strings in a fixed rule
//! order, and within a rule in document order, so callers (and tests) can
//! rely on reproducible output. The linter is advisory; whether violations
//! block persistence is the engine's policy decision.

use std::collections::BTreeMap;

use crate::model::{Document, ElementType, ObjectId};

/// Runs all structural rules against the document.
///
/// Rule order: start/end presence, complex-gateway rejection, gateway
/// fan-out, then per-element connectivity.
pub fn lint(document: &Document) -> Vec<String> {
    let mut violations = Vec::new();

    let has_start = document
        .elements()
        .iter()
        .any(|element| element.element_type() == ElementType::StartEvent);
    let has_end = document
        .elements()
        .iter()
        .any(|element| element.element_type() == ElementType::EndEvent);
    if !has_start {
        violations.push("Process must have at least one Start Event".to_owned());
    }
    if !has_end {
        violations.push("Process must have at least one End Event".to_owned());
    }

    if document
        .elements()
        .iter()
        .any(|element| element.element_type() == ElementType::ComplexGateway)
    {
        violations.push("Complex Gateways are not supported".to_owned());
    }

    let mut incoming: BTreeMap<&ObjectId, usize> = BTreeMap::new();
    let mut outgoing: BTreeMap<&ObjectId, usize> = BTreeMap::new();
    for element in document.elements() {
        incoming.insert(element.id(), 0);
        outgoing.insert(element.id(), 0);
    }
    for flow in document.flows() {
        if let Some(count) = incoming.get_mut(flow.target()) {
            *count += 1;
        }
        if let Some(count) = outgoing.get_mut(flow.source()) {
            *count += 1;
        }
    }

    for element in document.elements() {
        if !element.element_type().requires_fan_out() {
            continue;
        }
        if outgoing[element.id()] < 2 {
            violations.push(format!(
                "{} '{}' must have at least 2 outgoing paths",
                element.element_type().label(),
                element.display_name()
            ));
        }
    }

    for element in document.elements() {
        let name = element.display_name();
        match element.element_type() {
            ElementType::StartEvent => {
                if outgoing[element.id()] == 0 {
                    violations.push(format!(
                        "Start Event '{name}' is not connected to anything"
                    ));
                }
            }
            ElementType::EndEvent => {
                if incoming[element.id()] == 0 {
                    violations.push(format!("End Event '{name}' is unreachable"));
                }
            }
            _ => {
                if incoming[element.id()] == 0 {
                    violations.push(format!("Node '{name}' is unreachable (no incoming flows)"));
                }
                if outgoing[element.id()] == 0 {
                    violations.push(format!("Node '{name}' is a dead end (no outgoing flows)"));
                }
            }
        }
    }

    violations
}
