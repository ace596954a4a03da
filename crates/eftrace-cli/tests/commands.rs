use assert_cmd::Command;
use eftrace_testing::{SAMPLE_SESSION, SampleFiles};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Sample logs plus an isolated config location
struct Fixture {
    samples: SampleFiles,
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            samples: SampleFiles::new().expect("sample folder"),
            home: TempDir::new().expect("temp dir"),
        }
    }

    #[allow(deprecated)]
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("eftrace").expect("eftrace binary");
        cmd.env("EFTRACE_CONFIG", self.home.path().join("config.toml"))
            .env_remove("RUST_LOG")
            .arg("--workers")
            .arg("2");
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self
            .command()
            .arg("--format")
            .arg("json")
            .args(args)
            .arg(self.samples.root())
            .output()
            .expect("run eftrace");
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        serde_json::from_slice(&output.stdout).expect("json output")
    }
}

#[test]
fn test_import_plain_summary() {
    let fixture = Fixture::new();

    fixture
        .command()
        .arg("import")
        .arg(fixture.samples.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 9 files (0 skipped)"))
        .stdout(predicate::str::contains(SAMPLE_SESSION))
        .stdout(predicate::str::contains("hits 2  misses 1"))
        .stdout(predicate::str::contains("NullReferenceException"));
}

#[test]
fn test_import_json_summary() {
    let fixture = Fixture::new();
    let summary = fixture.json(&["import", "--top", "1"]);

    assert_eq!(summary["files"], 9);
    assert_eq!(summary["failures"].as_array().map(Vec::len), Some(0));
    assert_eq!(summary["quests"]["completed"], 1);
    assert_eq!(summary["top_error_families"].as_array().map(Vec::len), Some(1));
    assert_eq!(summary["top_error_families"][0]["key"], "NullReferenceException");
    assert_eq!(summary["statistics"]["backend"]["total_requests"], 3);
}

#[test]
fn test_import_reports_skipped_files() {
    let fixture = Fixture::new();
    fixture
        .samples
        .write_file(
            &format!("{} backend_001.log", SAMPLE_SESSION),
            "this file has no log headers\n",
        )
        .expect("write corrupt file");

    fixture
        .command()
        .arg("import")
        .arg(fixture.samples.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 9 files (1 skipped)"))
        .stdout(predicate::str::contains("backend_001.log"));
}

#[test]
fn test_sessions_json() {
    let fixture = Fixture::new();
    let sessions = fixture.json(&["sessions"]);

    let sessions = sessions.as_array().expect("array");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["id"], SAMPLE_SESSION);
    assert_eq!(sessions[0]["file_count"], 9);
    assert_eq!(sessions[0]["event_count"], 35);
}

#[test]
fn test_quests_filtered_by_status() {
    let fixture = Fixture::new();

    let completed = fixture.json(&["quests", "--status", "completed"]);
    let completed = completed.as_array().expect("array");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["id"], "5936d90786f7742b1420ba5b");
    assert_eq!(completed[0]["status"], "completed");
    assert_eq!(completed[0]["trader_id"], "54cb50c76803fa8b248b4571");

    let failed = fixture.json(&["quests", "--status", "failed"]);
    assert_eq!(failed.as_array().map(Vec::len), Some(0));
}

#[test]
fn test_export_writes_document() {
    let fixture = Fixture::new();
    let output = fixture.home.path().join("out/report.json");

    fixture
        .command()
        .arg("export")
        .arg(fixture.samples.root())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 9 results (0 skipped)"));

    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&output).expect("export file"))
            .expect("export json");
    assert_eq!(document["format_version"], 1);
    assert_eq!(document["results"].as_array().map(Vec::len), Some(9));
    assert_eq!(document["statistics"]["sessions"][0]["id"], SAMPLE_SESSION);
}

#[test]
fn test_missing_path_fails() {
    let fixture = Fixture::new();

    fixture
        .command()
        .arg("import")
        .arg(fixture.home.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_config_fails() {
    let fixture = Fixture::new();
    std::fs::write(fixture.home.path().join("config.toml"), "pool = \"not a table\"\n")
        .expect("write config");

    fixture
        .command()
        .arg("sessions")
        .arg(fixture.samples.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
