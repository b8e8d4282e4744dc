// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic pattern interpreter.
//!
//! An ordered rule list over the lowercased command; the first matching rule
//! wins, and no match means `noop`. Names captured here stay lowercase,
//! which is fine because downstream name resolution is case-insensitive.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::ElementType;
use crate::ops::PatchOp;

fn add_task_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"add (?:a )?(?:user )?task (?:called|named) ['"]?([^'"]+)['"]?"#)
            .unwrap_or_else(|err| unreachable!("static regex: {err}"))
    })
}

fn connect_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"connect ['"]?([^'"]+)['"]? to ['"]?([^'"]+)['"]?"#)
            .unwrap_or_else(|err| unreachable!("static regex: {err}"))
    })
}

fn remove_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"remove ['"]?([^'"]+)['"]?"#)
            .unwrap_or_else(|err| unreachable!("static regex: {err}"))
    })
}

fn rename_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"rename ['"]?([^'"]+)['"]? to ['"]?([^'"]+)['"]?"#)
            .unwrap_or_else(|err| unreachable!("static regex: {err}"))
    })
}

fn convert_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"convert ['"]?([^'"]+)['"]? to (?:exclusive )?gateway"#)
            .unwrap_or_else(|err| unreachable!("static regex: {err}"))
    })
}

fn add_node(element_type: ElementType, name: &str) -> PatchOp {
    PatchOp::AddNode {
        element_type,
        name: Some(name.to_owned()),
        id: None,
        lane_id: None,
    }
}

/// Interprets a command with the ordered rule list. Never fails; unmatched
/// input yields `noop`.
pub fn interpret(command: &str) -> PatchOp {
    let command = command.to_lowercase();
    let command = command.trim();

    if let Some(captures) = add_task_re().captures(command) {
        let element_type = if command.contains("user task") {
            ElementType::UserTask
        } else {
            ElementType::Task
        };
        return add_node(element_type, captures[1].trim());
    }

    if command.contains("add") && command.contains("start event") {
        return add_node(ElementType::StartEvent, "Start");
    }
    if command.contains("add") && command.contains("end event") {
        return add_node(ElementType::EndEvent, "End");
    }
    if command.contains("add") && command.contains("parallel gateway") {
        return add_node(ElementType::ParallelGateway, "Gateway");
    }
    if command.contains("add") && command.contains("exclusive gateway") {
        return add_node(ElementType::ExclusiveGateway, "Gateway");
    }

    if let Some(captures) = connect_re().captures(command) {
        return PatchOp::ConnectByName {
            source_name: captures[1].trim().to_owned(),
            target_name: captures[2].trim().to_owned(),
            name: None,
        };
    }

    if let Some(captures) = remove_re().captures(command) {
        return PatchOp::RemoveByName {
            name: captures[1].trim().to_owned(),
        };
    }

    if let Some(captures) = rename_re().captures(command) {
        return PatchOp::RenameByName {
            old_name: captures[1].trim().to_owned(),
            new_name: captures[2].trim().to_owned(),
        };
    }

    if let Some(captures) = convert_re().captures(command) {
        return PatchOp::ConvertByName {
            name: captures[1].trim().to_owned(),
            element_type: ElementType::ExclusiveGateway,
        };
    }

    PatchOp::Noop {}
}
