use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn susan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("susan").unwrap();
    cmd.env("SUSAN_CONFIG", home.path().join("config.json"));
    cmd
}

#[test]
fn parse_text_defaults_delivery_date() {
    let home = TempDir::new().unwrap();

    susan(&home)
        .args(["parse", "--date", "2026-10-15"])
        .arg("고등어 50박스, 갈치 30박스 주문해주세요. 급한 주문입니다.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deliveryDate\": \"2026-10-18\""))
        .stdout(predicate::str::contains("\"name\": \"갈치\""))
        .stdout(predicate::str::contains("급한 주문입니다"))
        .stderr(predicate::str::contains("Directory snapshot is empty"));
}

#[test]
fn parse_without_items_fails_with_message() {
    let home = TempDir::new().unwrap();

    susan(&home)
        .args(["parse", "내일 다시 전화드릴게요"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("주문 품목을 찾을 수 없습니다"));
}

#[test]
fn parse_matches_directory_files() {
    let home = TempDir::new().unwrap();
    let fish = home.path().join("fish.json");
    let businesses = home.path().join("businesses.json");
    fs::write(&fish, r#"{"content": [{"id": 3, "name": "방어"}], "last": true}"#).unwrap();
    fs::write(&businesses, r#"[{"id": 9, "companyName": "동해수산"}]"#).unwrap();

    susan(&home)
        .args(["parse", "동해수산 방어 5마리", "--format", "csv"])
        .arg("--fish-types")
        .arg(&fish)
        .arg("--businesses")
        .arg(&businesses)
        .assert()
        .success()
        .stdout(predicate::str::contains("3,방어,5,마리,40000"))
        .stdout(predicate::str::contains("동해수산"));
}

#[test]
fn parse_reads_stdin() {
    let home = TempDir::new().unwrap();

    susan(&home)
        .args(["parse", "--format", "text"])
        .write_stdin("우럭 4마리 손질해서 보내주세요")
        .assert()
        .success()
        .stdout(predicate::str::contains("우럭 4 마리 (unmatched)"))
        .stdout(predicate::str::contains("Memo: 손질해서 보내주세요"));
}

#[test]
fn batch_writes_drafts_and_summary() {
    let home = TempDir::new().unwrap();
    let orders = home.path().join("orders");
    let out = home.path().join("out");
    fs::create_dir_all(&orders).unwrap();
    fs::write(orders.join("a.txt"), "고등어 10박스").unwrap();
    fs::write(orders.join("b.txt"), "안녕하세요").unwrap();

    susan(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", orders.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error", "--date", "2026-10-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful, 1 failed"));

    assert!(out.join("a.json").exists());
    assert!(!out.join("b.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,success,1,1,,2026-10-18,150000"));
    assert!(summary.contains("b.txt,error"));
}

#[test]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();

    susan(&home)
        .args(["config", "set", "extraction.default_delivery_days", "1"])
        .assert()
        .success();

    susan(&home)
        .args(["config", "get", "extraction.default_delivery_days"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));

    susan(&home)
        .args(["parse", "--date", "2026-10-15", "광어 2마리"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-10-16"));
}
