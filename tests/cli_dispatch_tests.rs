use std::fs;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_damage-aid")
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(args)
        .env_remove("DAMAGE_AID_SEED")
        .output()
        .expect("damage-aid should run")
}

#[test]
fn no_command_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: damage-aid"));
}

#[test]
fn assess_command_emits_estimate_json() {
    let output = run(&["assess", "Water Damage", "Severe", "$5,000"]);
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("assess should emit json");
    assert_eq!(payload["estimated_cost"], 15000);
    assert_eq!(payload["risk_level"], "high");
    assert_eq!(payload["budget_match"], "Over Budget");
}

#[test]
fn assess_command_returns_usage_without_severity() {
    let output = run(&["assess", "Water Damage"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: damage-aid assess"));
}

#[test]
fn analyze_command_reads_photos_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("kitchen.png");
    let second = dir.path().join("hall.JPG");
    fs::write(&first, b"\x89PNG fake").unwrap();
    fs::write(&second, b"\xff\xd8 fake").unwrap();

    let output = run(&[
        "analyze",
        "--seed",
        "5",
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("analyze should emit json");
    assert_eq!(payload["photo_count"], 2);
    assert!(payload["estimated_cost"].as_u64().unwrap() > 0);
    assert!(payload["confidence"].as_str().unwrap().ends_with('%'));

    let again = run(&[
        "analyze",
        "--seed",
        "5",
        first.to_str().unwrap(),
        second.to_str().unwrap(),
    ]);
    assert_eq!(output.stdout, again.stdout);
}

#[test]
fn analyze_command_rejects_non_images() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "not a photo").unwrap();

    let output = run(&["analyze", notes.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn catalog_and_education_commands_emit_json() {
    let catalog = run(&["catalog"]);
    assert_eq!(catalog.status.code(), Some(0));
    let payload: serde_json::Value = serde_json::from_slice(&catalog.stdout).unwrap();
    assert_eq!(payload["entries"].as_array().map(Vec::len), Some(10));

    let education = run(&["education"]);
    assert_eq!(education.status.code(), Some(0));
    let payload: serde_json::Value = serde_json::from_slice(&education.stdout).unwrap();
    assert!(payload["topics"].as_array().is_some_and(|topics| !topics.is_empty()));
}

#[test]
fn validate_command_passes_on_builtin_catalog() {
    let output = run(&["validate"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("catalog validation: 0 error(s)"));
}
