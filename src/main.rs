// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! Reads a process document (JSON, or BPMN XML for `.bpmn`/`.xml` files),
//! optionally applies a natural-language command, and prints lint findings
//! or writes an export.
//!
//! Set `OPENAI_API_KEY` and pass `--llm` to interpret commands with the
//! LLM backend instead of the deterministic pattern rules.

use std::error::Error;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use proteus::codec::{parse_document_json, parse_document_xml};
use proteus::engine::{export, EditRequest, Engine, ExportFormat, LintPolicy};
use proteus::interpret::CommandInterpreter;
use proteus::lint::lint;
use proteus::model::Document;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <file> --lint\n  {program} <file> --command <text> [--llm] [--strict] [--export <xml|json>] [--out <path>]\n  {program} <file> --export <xml|json> [--out <path>]\n\n<file> is parsed as BPMN XML when it ends in .bpmn or .xml, otherwise as JSON.\n\n--lint prints lint findings and exits 1 if there are any.\n--command applies one natural-language edit before linting/exporting.\n--llm interprets the command with the LLM backend (requires OPENAI_API_KEY).\n--strict rejects edits whose result has lint violations.\n--export writes the (possibly edited) document in the given format.\n--out chooses the output path (default: the export's own filename)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<String>,
    lint: bool,
    command: Option<String>,
    llm: bool,
    strict: bool,
    export: Option<String>,
    out: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lint" => {
                if options.lint {
                    return Err(());
                }
                options.lint = true;
            }
            "--command" => {
                if options.command.is_some() {
                    return Err(());
                }
                let command = args.next().ok_or(())?;
                options.command = Some(command);
            }
            "--llm" => {
                if options.llm {
                    return Err(());
                }
                options.llm = true;
            }
            "--strict" => {
                if options.strict {
                    return Err(());
                }
                options.strict = true;
            }
            "--export" => {
                if options.export.is_some() {
                    return Err(());
                }
                let format = args.next().ok_or(())?;
                options.export = Some(format);
            }
            "--out" => {
                if options.out.is_some() {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                options.out = Some(path);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    if options.file.is_none() {
        return Err(());
    }
    if !options.lint && options.command.is_none() && options.export.is_none() {
        return Err(());
    }
    if options.lint && (options.command.is_some() || options.export.is_some()) {
        return Err(());
    }
    if (options.llm || options.strict) && options.command.is_none() {
        return Err(());
    }
    if options.out.is_some() && options.export.is_none() {
        return Err(());
    }

    Ok(options)
}

fn load_document(path: &str) -> Result<Document, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let is_xml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bpmn") || ext.eq_ignore_ascii_case("xml"));
    if is_xml {
        Ok(parse_document_xml(&raw)?)
    } else {
        Ok(parse_document_json(&raw)?)
    }
}

fn interpreter(use_llm: bool) -> Result<CommandInterpreter, Box<dyn Error>> {
    if !use_llm {
        return Ok(CommandInterpreter::pattern());
    }
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| "--llm requires the OPENAI_API_KEY environment variable")?;
    Ok(CommandInterpreter::openai(api_key))
}

fn main() {
    let result = (|| -> Result<i32, Box<dyn Error>> {
        env_logger::init();

        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let file = options.file.unwrap_or_default();
        let mut document = load_document(&file)?;

        if options.lint {
            let violations = lint(&document);
            for violation in &violations {
                println!("{violation}");
            }
            if violations.is_empty() {
                println!("no lint findings");
                return Ok(0);
            }
            return Ok(1);
        }

        if let Some(command) = options.command {
            let store = proteus::version::MemoryVersionStore::new();
            let mut engine = Engine::new(store, interpreter(options.llm)?);
            if options.strict {
                engine = engine.with_lint_policy(LintPolicy::RejectOnViolation);
            }

            let response = engine.edit(EditRequest {
                command,
                if_match: None,
                bpmn: Some(proteus::codec::document_to_json(&document)),
                bpmn_xml: None,
                model_version_id: None,
            })?;
            for change in &response.changes {
                println!("{change}");
            }
            document = proteus::codec::document_from_json(response.bpmn)?;
        }

        if let Some(format) = options.export {
            let format: ExportFormat = format.parse()?;
            let payload = export(&document, format)?;
            let content = BASE64.decode(payload.content.as_bytes())?;
            let out = options.out.unwrap_or(payload.filename);
            std::fs::write(&out, content)?;
            println!("wrote {out}");
        }

        Ok(0)
    })();

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn lint_mode_parses() {
        let options = parse(&["process.json", "--lint"]).expect("options");
        assert_eq!(options.file.as_deref(), Some("process.json"));
        assert!(options.lint);
    }

    #[test]
    fn command_mode_parses_with_modifiers() {
        let options = parse(&[
            "process.json",
            "--command",
            "add a task called 'Review'",
            "--llm",
            "--strict",
            "--export",
            "xml",
            "--out",
            "edited.bpmn",
        ])
        .expect("options");
        assert_eq!(options.command.as_deref(), Some("add a task called 'Review'"));
        assert!(options.llm);
        assert!(options.strict);
        assert_eq!(options.export.as_deref(), Some("xml"));
        assert_eq!(options.out.as_deref(), Some("edited.bpmn"));
    }

    #[test]
    fn export_only_mode_parses() {
        let options = parse(&["process.bpmn", "--export", "json"]).expect("options");
        assert_eq!(options.export.as_deref(), Some("json"));
        assert!(options.command.is_none());
    }

    #[test]
    fn a_file_argument_is_required() {
        assert_eq!(parse(&["--lint"]), Err(()));
        assert_eq!(parse(&[]), Err(()));
    }

    #[test]
    fn at_least_one_mode_is_required() {
        assert_eq!(parse(&["process.json"]), Err(()));
    }

    #[test]
    fn lint_excludes_the_other_modes() {
        assert_eq!(parse(&["f.json", "--lint", "--export", "xml"]), Err(()));
        assert_eq!(parse(&["f.json", "--lint", "--command", "x"]), Err(()));
    }

    #[test]
    fn llm_and_strict_require_a_command() {
        assert_eq!(parse(&["f.json", "--llm", "--lint"]), Err(()));
        assert_eq!(parse(&["f.json", "--strict", "--export", "xml"]), Err(()));
    }

    #[test]
    fn out_requires_export() {
        assert_eq!(parse(&["f.json", "--lint", "--out", "x"]), Err(()));
    }

    #[test]
    fn duplicate_and_unknown_flags_are_rejected() {
        assert_eq!(parse(&["f.json", "--lint", "--lint"]), Err(()));
        assert_eq!(parse(&["f.json", "--frobnicate"]), Err(()));
        assert_eq!(parse(&["f.json", "extra.json", "--lint"]), Err(()));
    }

    #[test]
    fn flags_with_values_reject_missing_values() {
        assert_eq!(parse(&["f.json", "--command"]), Err(()));
        assert_eq!(parse(&["f.json", "--export"]), Err(()));
    }
}
