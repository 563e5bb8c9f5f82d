//! Integration tests driving the verifier through the public API.

use prereq::config::parse_config;
use prereq::requirements::MockHost;
use prereq::runner::{import_command, RunOptions, Verifier};
use prereq::ui::MockUI;
use std::path::Path;

const CHECKLIST: &str = r#"
app_name: Synthetic Respondent
phase: Phase 4
tools:
  - name: claude
  - name: python3
    minimum_version: "3.11"
package_manager:
  name: uv
  bootstrap: "curl -LsSf https://astral.sh/uv/install.sh | sh"
  install: uv pip install
  system_flag: --system
  environment_markers: [.venv]
  extra_paths: ["~/.local/bin"]
libraries:
  - module: pydantic
  - module: claude_agent_sdk
    package: claude-agent-sdk
upstream:
  - phase: Phase 3
    command: bash scripts/check_phase3.sh
artifacts:
  - module: src.personas.generator
    symbols: [PersonaGenerator]
    phase: Phase 3
env:
  - name: ANTHROPIC_API_KEY
"#;

fn import(module: &str) -> String {
    import_command("python3", module, &[])
}

/// A machine where everything is present except the two libraries.
fn fresh_host() -> MockHost {
    let mut host = MockHost::new("/project");
    host.add_binary("claude");
    host.add_binary("python3");
    host.add_binary("uv");
    host.respond("python3 --version", 0, "Python 3.12.1");
    host.respond(&import("pydantic"), 0, "");
    host.queue_exit_codes(&import("pydantic"), &[1]);
    host.respond(&import("claude_agent_sdk"), 0, "");
    host.queue_exit_codes(&import("claude_agent_sdk"), &[1]);
    host.respond("uv pip install --system pydantic", 0, "");
    host.respond("uv pip install --system claude-agent-sdk", 0, "");
    host.respond("bash scripts/check_phase3.sh", 0, "");
    host.respond(
        &import_command(
            "python3",
            "src.personas.generator",
            &["PersonaGenerator".to_string()],
        ),
        0,
        "",
    );
    host.set_env("ANTHROPIC_API_KEY", "sk-test");
    host
}

#[test]
fn first_run_installs_then_second_run_is_idempotent() {
    let config = parse_config(CHECKLIST, Path::new("phase4.yml")).unwrap();
    let verifier = Verifier::new(&config, RunOptions::default()).unwrap();
    let mut host = fresh_host();

    let mut ui = MockUI::new();
    let first = verifier.run(&mut host, &mut ui);
    assert!(first.success());
    assert_eq!(first.installed(), vec!["pydantic", "claude_agent_sdk"]);
    assert!(host.ran("uv pip install --system pydantic"));

    host.clear_executed();
    let mut ui = MockUI::new();
    let second = verifier.run(&mut host, &mut ui);
    assert!(second.success());
    assert!(second.installed().is_empty());
    assert!(!host.ran("pip install"));
    assert!(!host.ran("install.sh"));
}

#[test]
fn failing_upstream_stops_before_artifacts() {
    let config = parse_config(CHECKLIST, Path::new("phase4.yml")).unwrap();
    let verifier = Verifier::new(&config, RunOptions::default()).unwrap();
    let mut host = fresh_host();
    host.respond("bash scripts/check_phase3.sh", 2, "");

    let mut ui = MockUI::new();
    let report = verifier.run(&mut host, &mut ui);

    assert_eq!(report.exit_code, 2);
    assert_eq!(report.records.last().unwrap().name, "Phase 3");
    assert!(!host.ran("src.personas.generator"));
    assert!(ui.has_error("Phase 3 verification failed"));
}

#[test]
fn report_serializes_evaluated_checks() {
    let config = parse_config(CHECKLIST, Path::new("phase4.yml")).unwrap();
    let verifier = Verifier::new(&config, RunOptions::default()).unwrap();
    let mut host = fresh_host();
    host.respond("python3 --version", 0, "Python 3.10.4");

    let mut ui = MockUI::new();
    let report = verifier.run(&mut host, &mut ui);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["exit_code"], 1);
    let records = json["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["status"], "failed");
    assert_eq!(records[1]["kind"], "versioned_binary");
}
