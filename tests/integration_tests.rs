//! Integration tests for the Nexa CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to get a nexa command
fn nexa() -> Command {
    Command::cargo_bin("nexa").unwrap()
}

/// Helper to create a seeded workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    nexa()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to create a workspace with empty collections
fn setup_empty_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    nexa()
        .current_dir(tmp.path())
        .args(["init", "--empty"])
        .assert()
        .success();
    tmp
}

/// Helper to create a lead and return its id
fn create_test_lead(tmp: &TempDir, name: &str) -> String {
    let output = nexa()
        .current_dir(tmp.path())
        .args([
            "lead",
            "new",
            "--name",
            name,
            "--email",
            "test@example.com",
            "--phone",
            "+971 50 555 0000",
            "-q",
        ])
        .output()
        .unwrap();

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    nexa()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dual-brand CRM"));
}

#[test]
fn test_version_displays() {
    nexa()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nexa"));
}

#[test]
fn test_unknown_command_fails() {
    nexa().arg("unknown-command").assert().failure();
}

#[test]
fn test_commands_fail_outside_workspace() {
    let tmp = TempDir::new().unwrap();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a Nexa workspace"));
}

// ============================================================================
// Init Tests
// ============================================================================

#[test]
fn test_init_creates_workspace_structure() {
    let tmp = setup_workspace();
    assert!(tmp.path().join(".nexa").is_dir());
    assert!(tmp.path().join("data/leads.yaml").is_file());
    assert!(tmp.path().join("data/follow_ups.yaml").is_file());
}

#[test]
fn test_init_twice_fails() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_seeds_sample_data() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("L001"));
}

#[test]
fn test_init_empty_starts_with_no_records() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

// ============================================================================
// Lead CRUD Tests
// ============================================================================

#[test]
fn test_lead_new_and_show() {
    let tmp = setup_empty_workspace();
    let id = create_test_lead(&tmp, "Zara Ahmed");
    assert_eq!(id, "L001");

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zara Ahmed"));
}

#[test]
fn test_lead_show_accepts_bare_number() {
    let tmp = setup_empty_workspace();
    create_test_lead(&tmp, "Zara Ahmed");

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Zara Ahmed"));
}

#[test]
fn test_lead_update_merges_fields() {
    let tmp = setup_empty_workspace();
    let id = create_test_lead(&tmp, "Zara Ahmed");

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "update", &id, "--status", "qualified"])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("status: qualified"))
        .stdout(predicate::str::contains("Zara Ahmed"));
}

#[test]
fn test_lead_update_unknown_id_fails() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "update", "L999", "--status", "won"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no lead with id L999"));
}

#[test]
fn test_lead_delete_with_yes_flag() {
    let tmp = setup_empty_workspace();
    let id = create_test_lead(&tmp, "Zara Ahmed");

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "delete", &id, "--yes"])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

#[test]
fn test_lead_id_not_reused_after_delete() {
    let tmp = setup_empty_workspace();
    create_test_lead(&tmp, "First");
    let second = create_test_lead(&tmp, "Second");

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "delete", &second, "--yes"])
        .assert()
        .success();

    let third = create_test_lead(&tmp, "Third");
    assert_eq!(third, "L003");
}

#[test]
fn test_lead_list_filters_by_status() {
    let tmp = setup_empty_workspace();
    let id = create_test_lead(&tmp, "Zara Ahmed");
    create_test_lead(&tmp, "Bilal Rashid");

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "update", &id, "--status", "qualified"])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "--status", "qualified", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_lead_list_rejects_bad_status() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "--status", "imaginary"])
        .assert()
        .failure();
}

#[test]
fn test_wrong_kind_id_rejected() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "show", "P001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a lead id"));
}

// ============================================================================
// Output Format Tests
// ============================================================================

#[test]
fn test_lead_list_json_output() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains("\"id\": \"L001\""));
}

#[test]
fn test_lead_list_csv_output() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,name,"));
}

#[test]
fn test_lead_list_md_output() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "-f", "md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("| ID |"));
}

// ============================================================================
// Other Collections
// ============================================================================

#[test]
fn test_property_new_and_list() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args([
            "property",
            "new",
            "--title",
            "Palm Vista Villa",
            "--type",
            "villa",
            "--price",
            "6800000",
            "--location",
            "Palm Jumeirah",
            "--bedrooms",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("P001"));

    nexa()
        .current_dir(tmp.path())
        .args(["property", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Palm Vista Villa"))
        .stdout(predicate::str::contains("AED 6,800,000"));
}

#[test]
fn test_deal_new_and_open_filter() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args([
            "deal",
            "new",
            "--title",
            "Marina 2BR sale",
            "--client",
            "Fatima Khan",
            "--property",
            "Marina Heights 1204",
            "--value",
            "2100000",
            "--stage",
            "won",
            "--expected-close",
            "2025-10-15",
        ])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["deal", "list", "--open", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

#[test]
fn test_pledge_pay_reduces_pending() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args([
            "pledge",
            "new",
            "--client",
            "Hassan Al Maktoum",
            "--property",
            "Creek Rise T2",
            "--amount",
            "1000000",
            "--paid",
            "200000",
        ])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["pledge", "pay", "PL001", "300000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AED 500,000"));

    nexa()
        .current_dir(tmp.path())
        .args(["pledge", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending: AED 500,000"));
}

#[test]
fn test_task_done_flow() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args([
            "task",
            "new",
            "--title",
            "Send contract to Zara",
            "--due-date",
            "2025-09-20",
            "--due-time",
            "14:30",
        ])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["task", "done", "T001"])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["task", "list", "--status", "pending", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0\n"));
}

#[test]
fn test_viewing_schedule_and_list_by_date() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args([
            "viewing",
            "new",
            "--property",
            "Marina Heights 1204",
            "--client",
            "Fatima Khan",
            "--date",
            "2025-09-18",
            "--time",
            "10:00",
            "--agent",
            "Omar Hassan",
        ])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["viewing", "list", "--on", "2025-09-18", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_followup_done_flow() {
    let tmp = setup_empty_workspace();
    nexa()
        .current_dir(tmp.path())
        .args([
            "followup",
            "new",
            "--lead",
            "Zara Ahmed",
            "--type",
            "whatsapp",
            "--date",
            "2025-09-16",
        ])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["followup", "done", "F001"])
        .assert()
        .success();

    nexa()
        .current_dir(tmp.path())
        .args(["followup", "list", "--status", "done", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

// ============================================================================
// Status and Config
// ============================================================================

#[test]
fn test_status_shows_dashboard() {
    let tmp = setup_workspace();
    nexa()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leads"))
        .stdout(predicate::str::contains("Pledges"))
        .stdout(predicate::str::contains("Follow-ups"));
}

#[test]
fn test_config_list_shows_all_keys() {
    nexa()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accent.real-estate"))
        .stdout(predicate::str::contains("currency"))
        .stdout(predicate::str::contains("timezone"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    nexa()
        .args(["config", "get", "theme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown setting"));
}

#[test]
fn test_completions_generate() {
    nexa()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nexa"));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_data_survives_between_invocations() {
    let tmp = setup_empty_workspace();
    create_test_lead(&tmp, "Zara Ahmed");

    let yaml = std::fs::read_to_string(tmp.path().join("data/leads.yaml")).unwrap();
    assert!(yaml.contains("Zara Ahmed"));
    assert!(yaml.contains("id: L001"));

    nexa()
        .current_dir(tmp.path())
        .args(["lead", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
}

#[test]
fn test_workspace_flag_overrides_discovery() {
    let tmp = setup_workspace();
    let elsewhere = TempDir::new().unwrap();

    nexa()
        .current_dir(elsewhere.path())
        .args([
            "lead",
            "list",
            "--count",
            "--workspace",
            tmp.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\n$").unwrap());
}
