use std::path::PathBuf;

use serde::Serialize;
use tracing::error;

use crate::classifier::{AnalysisRecord, DamageClassifier, SimulatedClassifier};
use crate::config::AppConfig;
use crate::data::catalog::catalog_snapshot;
use crate::data::education::{EMERGENCY_CONTACTS, TOPICS};
use crate::data::validate::{validate_catalog, ValidationSeverity};
use crate::engine::report::{build_results, estimate};
use crate::server;
use crate::session::photos::read_photo_files;

const USAGE: &str = "usage: damage-aid <serve|assess|analyze|catalog|validate|education>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Assess,
    Analyze,
    Catalog,
    Validate,
    Education,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("assess") => Some(Command::Assess),
        Some("analyze") => Some(Command::Analyze),
        Some("catalog") => Some(Command::Catalog),
        Some("validate") => Some(Command::Validate),
        Some("education") => Some(Command::Education),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Assess) => handle_assess(args),
        Some(Command::Analyze) => handle_analyze(args),
        Some(Command::Catalog) => print_json(&catalog_snapshot(), "catalog"),
        Some(Command::Validate) => handle_validate(),
        Some(Command::Education) => print_json(
            &serde_json::json!({ "topics": TOPICS, "emergency_contacts": EMERGENCY_CONTACTS }),
            "education topics",
        ),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn runtime() -> Option<tokio::runtime::Runtime> {
    match tokio::runtime::Runtime::new() {
        Ok(runtime) => Some(runtime),
        Err(err) => {
            error!(error = %err, "failed to start async runtime");
            None
        }
    }
}

fn handle_serve() -> i32 {
    let config = AppConfig::from_env();
    let Some(runtime) = runtime() else {
        return 1;
    };
    match runtime.block_on(server::run_server(config)) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_assess(args: &[String]) -> i32 {
    let (Some(damage_type), Some(severity)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: damage-aid assess <damage type> <severity> [budget]");
        return 2;
    };
    let budget = args.get(4).map(String::as_str);
    print_json(&estimate(damage_type, severity, budget), "estimate")
}

fn handle_analyze(args: &[String]) -> i32 {
    let mut seed = AppConfig::from_env().classifier_seed;
    let mut paths = Vec::new();
    let mut rest = args.iter().skip(2);
    while let Some(arg) = rest.next() {
        if arg == "--seed" {
            seed = Some(parse_u64_arg(rest.next(), "seed", 7));
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if paths.is_empty() {
        eprintln!("usage: damage-aid analyze [--seed N] <photo>...");
        return 2;
    }

    let Some(runtime) = runtime() else {
        return 1;
    };
    let photos = match runtime.block_on(read_photo_files(&paths)) {
        Ok(photos) => photos,
        Err(err) => {
            eprintln!("analyze failed: {err}");
            return 1;
        }
    };

    let classifier = match seed {
        Some(seed) => SimulatedClassifier::seeded(seed),
        None => SimulatedClassifier::from_entropy(),
    };
    let classification = match classifier.classify(&photos) {
        Ok(classification) => classification,
        Err(err) => {
            eprintln!("analyze failed: {err}");
            return 1;
        }
    };
    let record = AnalysisRecord::from(&classification);
    print_json(&build_results(None, photos.len(), &record), "results")
}

fn handle_validate() -> i32 {
    let report = validate_catalog();
    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    println!(
        "catalog validation: {} error(s), {} warning(s), {} info",
        report.count(ValidationSeverity::Error),
        report.count(ValidationSeverity::Warning),
        report.count(ValidationSeverity::Info)
    );
    if report.has_errors() {
        1
    } else {
        0
    }
}

fn print_json<T: Serialize>(value: &T, what: &str) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize {what}: {err}");
            1
        }
    }
}

fn parse_u64_arg(raw: Option<&String>, name: &str, default: u64) -> u64 {
    raw.and_then(|value| value.parse::<u64>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
