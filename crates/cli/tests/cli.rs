use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CREDENTIAL_ENVS: [&str; 7] = [
    "LINKEDIN_ACCESS_TOKEN",
    "LINKEDIN_ORGANIZATION_URN",
    "X_BEARER_TOKEN",
    "FACEBOOK_PAGE_ID",
    "FACEBOOK_PAGE_ACCESS_TOKEN",
    "HIRECAST_SIGNING_KEY",
    "HIRECAST_NEXT_SIGNING_KEY",
];

fn hirecast(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hirecast");
    cmd.current_dir(dir.path());
    for env in CREDENTIAL_ENVS {
        cmd.env_remove(env);
    }
    cmd
}

fn write_request(dir: &TempDir, title: Option<&str>, platforms: &[&str]) -> PathBuf {
    let request = serde_json::json!({
        "organizationId": "org_1",
        "teamId": "team_1",
        "job": {
            "id": "job_42",
            "title": title,
            "description": "Own the payments platform end to end.",
            "company_name": "Acme",
            "company_site": "https://acme.example/"
        },
        "platforms": platforms
    });
    let path = dir.path().join("request.json");
    fs::write(&path, request.to_string()).expect("write request");
    path
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    hirecast(&dir)
        .args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).expect("read config");
    assert!(content.contains("signing_key_env"));
    assert!(content.contains("[facebook]"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# mine\n").expect("write config");

    hirecast(&dir)
        .args(["config", "init", "--path"])
        .arg(&config_path)
        .assert()
        .failure();

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine\n");
}

#[test]
fn publish_reports_every_platform_in_order() {
    let dir = TempDir::new().expect("temp dir");
    let request = write_request(&dir, Some("Payments Engineer"), &["website", "linkedin", "unknown"]);

    let output = hirecast(&dir)
        .args(["publish", "--json", "--file"])
        .arg(&request)
        .output()
        .expect("run publish");

    assert!(output.status.success());

    let results: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let results = results.as_array().expect("array of results");
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["platform"], "website");
    assert_eq!(results[0]["ok"], true);
    assert_eq!(results[0]["externalId"], "https://acme.example/jobs/job_42");

    assert_eq!(results[1]["platform"], "linkedin");
    assert_eq!(results[1]["ok"], false);
    assert!(
        results[1]["message"]
            .as_str()
            .unwrap()
            .contains("LINKEDIN_ACCESS_TOKEN not set")
    );

    assert_eq!(results[2]["platform"], "unknown");
    assert_eq!(results[2]["ok"], false);
    assert_eq!(results[2]["message"], "Platform not integrated");
}

#[test]
fn publish_with_no_platforms_prints_nothing_to_do() {
    let dir = TempDir::new().expect("temp dir");
    let request = write_request(&dir, None, &[]);

    hirecast(&dir)
        .args(["publish", "--file"])
        .arg(&request)
        .assert()
        .success()
        .stdout(predicate::str::contains("No platforms selected"));
}

#[test]
fn publish_fails_on_missing_title() {
    let dir = TempDir::new().expect("temp dir");
    let request = write_request(&dir, None, &["website"]);

    hirecast(&dir)
        .args(["publish", "--file"])
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bad request"));
}

#[test]
fn publish_dry_run_uses_stub_ids() {
    let dir = TempDir::new().expect("temp dir");
    let request = write_request(&dir, Some("Payments Engineer"), &["x", "facebook"]);

    hirecast(&dir)
        .args(["publish", "--dry-run", "--file"])
        .arg(&request)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ x: stub_x_1"))
        .stdout(predicate::str::contains("✓ facebook: stub_facebook_1"));
}

#[test]
fn publish_reads_request_from_stdin() {
    let dir = TempDir::new().expect("temp dir");
    let request = write_request(&dir, Some("Payments Engineer"), &["twitter"]);
    let body = fs::read_to_string(&request).expect("read request");

    hirecast(&dir)
        .args(["publish", "--dry-run", "--file", "-"])
        .write_stdin(body)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ x: stub_x_1"));
}

#[test]
fn publish_to_outbox_writes_one_line_per_platform() {
    let dir = TempDir::new().expect("temp dir");
    let request = write_request(&dir, Some("Payments Engineer"), &["linkedin", "x", "website"]);
    let outbox = dir.path().join("out").join("outbox.jsonl");

    hirecast(&dir)
        .args(["publish", "--file"])
        .arg(&request)
        .arg("--outbox")
        .arg(&outbox)
        .assert()
        .success();

    let content = fs::read_to_string(&outbox).expect("read outbox");
    let entries: Vec<Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json line"))
        .collect();

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e["platform"] == "linkedin"));
    let x = entries.iter().find(|e| e["platform"] == "x").expect("x entry");
    assert!(
        x["text"]
            .as_str()
            .unwrap()
            .ends_with("https://acme.example/jobs/job_42")
    );
}

#[test]
fn doctor_reports_missing_credentials_as_warnings() {
    let dir = TempDir::new().expect("temp dir");

    let output = hirecast(&dir)
        .args(["doctor", "--json"])
        .output()
        .expect("run doctor");

    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(report["config"]["status"], "ok");
    assert_eq!(report["website"]["status"], "ok");
    assert_eq!(report["linkedin"]["status"], "warn");
    assert_eq!(report["overall"], "warn");
}

#[test]
fn doctor_fails_on_missing_config_file() {
    let dir = TempDir::new().expect("temp dir");

    hirecast(&dir)
        .args(["doctor", "--config", "missing.toml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Failed to load config"));
}
