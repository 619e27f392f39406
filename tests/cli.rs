use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const PLAN_ID: &str = "3f2b9c1e-0000-4000-8000-000000000001";

fn navi(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("navi").unwrap();
    cmd.current_dir(dir)
        .env_remove("GROQ_API_KEY")
        .env_remove("YOUTUBE_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Seed a snapshot with one two-task plan
fn seed_store(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("plans.json");
    let record = serde_json::json!({
        "id": PLAN_ID,
        "created_at": "2026-01-05T09:00:00Z",
        "plan": {
            "goal": "Backend developer",
            "why": "Build APIs",
            "timeframe": "1 month",
            "learning_speed": "average",
            "skill_level": "beginner",
            "roadmap": [{
                "month": 1,
                "focus": "HTTP",
                "weeks": [{
                    "week": 1,
                    "tasks": [
                        {"title": "Learn HTTP verbs", "description": "GET, POST", "estimated_time": "2 hours", "done": false},
                        {"title": "Write a router", "description": "Hello world", "estimated_time": "3 hours", "done": false}
                    ]
                }]
            }]
        }
    });
    let mut plans = serde_json::Map::new();
    plans.insert(PLAN_ID.to_string(), record);
    let snapshot = serde_json::json!({ "plans": plans });
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path
}

#[test]
fn test_schema_prints_config_schema() {
    let dir = tempfile::tempdir().unwrap();
    navi(dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("store_path"))
        .stdout(predicate::str::contains("enrich_policy"));
}

#[test]
fn test_schema_plan_prints_plan_schema() {
    let dir = tempfile::tempdir().unwrap();
    navi(dir.path())
        .args(["schema", "--plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("roadmap"))
        .stdout(predicate::str::contains("estimated_time"));
}

#[test]
fn test_init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();

    navi(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("GROQ_API_KEY"));

    let content = fs::read_to_string(dir.path().join("navi.yaml")).unwrap();
    assert!(content.contains("weeks_per_month: 4"));

    navi(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    navi(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_generate_without_key_fails_with_variable_name() {
    let dir = tempfile::tempdir().unwrap();
    navi(dir.path())
        .args(["generate", "--goal", "Rust developer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_next_unknown_plan_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(dir.path());

    navi(dir.path())
        .args(["next", "missing", "--store"])
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_next_and_done_walk_the_plan() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(dir.path());

    navi(dir.path())
        .args(["next", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn HTTP verbs"));

    navi(dir.path())
        .args(["done", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked done: Learn HTTP verbs"))
        .stdout(predicate::str::contains("1/2 done"));

    navi(dir.path())
        .args(["next", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Write a router"));

    navi(dir.path())
        .args(["done", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success();

    navi(dir.path())
        .args(["next", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("All tasks completed"));

    navi(dir.path())
        .args(["done", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No pending task"));
}

#[test]
fn test_done_by_position() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(dir.path());

    navi(dir.path())
        .args(["done", PLAN_ID, "--month", "1", "--week", "1", "--task", "2", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Write a router"));

    navi(dir.path())
        .args(["next", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn HTTP verbs"));
}

#[test]
fn test_list_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(dir.path());

    navi(dir.path())
        .args(["list", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains(PLAN_ID))
        .stdout(predicate::str::contains("0/2 done"));

    navi(dir.path())
        .args(["show", PLAN_ID, "--markdown", "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Month 1: HTTP"))
        .stdout(predicate::str::contains("- [ ] **Write a router** (3 hours)"));
}

#[test]
fn test_enrich_without_search_key_records_empty_lists() {
    let dir = tempfile::tempdir().unwrap();
    let store = seed_store(dir.path());

    navi(dir.path())
        .args(["enrich", PLAN_ID, "--store"])
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 searched"));

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    let tasks = &snapshot["plans"][PLAN_ID]["plan"]["roadmap"][0]["weeks"][0]["tasks"];
    assert_eq!(tasks[0]["videos"], serde_json::json!([]));
    assert_eq!(tasks[1]["title"], "Write a router");
}
