//! End-to-end tests for the `auric` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GOLD_DAILY: &str = "\
Date,Open,High,Low,Close
2024-01-02,99.0,101.0,98.0,100.0
2024-01-15,104.0,106.0,103.0,105.0
2024-02-01,109.0,111.0,108.0,110.0
2024-02-20,,,,
2024-03-04,120.0,122.0,119.0,121.0
";

const YIELDS_DAILY: &str = "\
Date,YTM
2024-01-02,3.95
2024-01-31,4.00
2024-02-29,4.50
2024-03-28,4.00
2024-03-29,.
";

fn auric(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("auric").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").env_remove("AURIC_CONFIG");
    cmd
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// GOLD
// =============================================================================

#[test]
fn gold_writes_monthly_report() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "prices.csv", GOLD_DAILY);

    auric(dir.path())
        .args(["-q", "-f", "csv", "gold", "--input", "prices.csv", "--output", "gold.csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("date,close,change,cumulative"));

    let lines = read_lines(&dir.path().join("gold.csv"));
    assert_eq!(
        lines,
        vec![
            "Date,Monthly Change,Cumul Monthly Returns",
            "2024-01-31,,",
            "2024-02-29,0.10000,1.10000",
            "2024-03-31,0.10000,1.21000",
        ]
    );
}

#[test]
fn gold_start_date_drops_earlier_months() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "xauusd_m.csv", GOLD_DAILY);

    auric(dir.path())
        .args(["-q", "gold", "--start-date", "2024-02-01", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-31").not());

    assert!(!dir.path().join("gold_monthly_returns.csv").exists());
}

#[test]
fn gold_minimal_prints_final_growth() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "xauusd_m.csv", GOLD_DAILY);

    auric(dir.path())
        .args(["-f", "minimal", "gold"])
        .assert()
        .success()
        .stdout("1.21000\n");
}

// =============================================================================
// BOND
// =============================================================================

#[test]
fn bond_writes_monthly_report() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "DGS10.csv", YIELDS_DAILY);

    auric(dir.path()).args(["-q", "bond"]).assert().success();

    let lines = read_lines(&dir.path().join("bonds_monthly_returns.csv"));
    assert_eq!(
        lines[0],
        "Date,YTM,Duration,Convexity,Investment Return,Investment Return (%),Cumul Monthly Returns"
    );
    assert_eq!(lines[1], "2024-01-31,0.04000,8.17572,78.89793,0.00000,0.00000,1.00000");
    assert_eq!(
        lines[2],
        "2024-02-29,0.04500,7.98186,76.20900,-0.03568,-3.56829,0.96432"
    );
    assert!(lines[3].starts_with("2024-03-31,0.04000,8.17572,78.89793,0.04554,"));
    assert!(lines[3].ends_with(",1.00823"));
}

#[test]
fn bond_minimal_prints_final_growth() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "DGS10.csv", YIELDS_DAILY);

    auric(dir.path())
        .args(["-f", "minimal", "bond", "--no-save"])
        .assert()
        .success()
        .stdout("1.00823\n");
}

#[test]
fn bond_rejects_non_positive_maturity() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "DGS10.csv", YIELDS_DAILY);

    auric(dir.path())
        .args(["bond", "--maturity", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("maturity"));
}

#[test]
fn missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();

    auric(dir.path())
        .args(["bond", "--input", "nowhere.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

// =============================================================================
// RATIO
// =============================================================================

const GOLD_REPORT: &str = "\
Date,Monthly Change,Cumul Monthly Returns
2024-01-31,,
2024-02-29,0.10000,1.10000
2024-03-31,0.10000,1.21000
";

const BOND_REPORT: &str = "\
Date,YTM,Duration,Convexity,Investment Return,Investment Return (%),Cumul Monthly Returns
2024-01-31,0.04000,8.17572,78.89793,0.00000,0.00000,1.00000
2024-02-29,0.04000,8.17572,78.89793,0.00000,0.00000,1.00000
2024-03-31,0.04000,8.17572,78.89793,0.10000,10.00000,1.10000
2024-04-30,0.04000,8.17572,78.89793,0.00000,0.00000,1.10000
";

#[test]
fn ratio_rebases_and_averages() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "gold_monthly_returns.csv", GOLD_REPORT);
    write(dir.path(), "bonds_monthly_returns.csv", BOND_REPORT);

    auric(dir.path())
        .args(["-q", "ratio", "--window", "2"])
        .assert()
        .success();

    let lines = read_lines(&dir.path().join("ratio_monthly.csv"));
    assert_eq!(
        lines,
        vec![
            "Date,Cumul Ratio,Cumul Ratio MA",
            "2024-01-31,100.00000,",
            "2024-02-29,110.00000,105.00000",
            "2024-03-31,110.00000,110.00000",
        ]
    );
}

#[test]
fn ratio_json_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "gold.csv", GOLD_REPORT);
    write(dir.path(), "bonds.csv", BOND_REPORT);

    let output = auric(dir.path())
        .args(["-f", "json", "ratio", "-g", "gold.csv", "-b", "bonds.csv", "--no-save"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["date"], "2024-01-31");
    assert_eq!(rows[0]["ratio"], 100.0);
    assert!(rows[0]["moving_average"].is_null());
}

#[test]
fn ratio_rejects_duplicate_dates() {
    let dir = TempDir::new().unwrap();
    let duplicated = format!("{GOLD_REPORT}2024-03-31,0.00000,1.21000\n");
    write(dir.path(), "gold_monthly_returns.csv", &duplicated);
    write(dir.path(), "bonds_monthly_returns.csv", BOND_REPORT);

    auric(dir.path())
        .args(["ratio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicated date 2024-03-31 in gold series"));

    assert!(!dir.path().join("ratio_monthly.csv").exists());
}

#[test]
fn config_file_sets_window() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "gold_monthly_returns.csv", GOLD_REPORT);
    write(dir.path(), "bonds_monthly_returns.csv", BOND_REPORT);
    write(dir.path(), "auric.toml", "[ratio]\nwindow = 1\n");

    auric(dir.path()).args(["-q", "ratio"]).assert().success();

    let lines = read_lines(&dir.path().join("ratio_monthly.csv"));
    assert_eq!(lines[1], "2024-01-31,100.00000,100.00000");
}

// =============================================================================
// RUN AND CONFIG
// =============================================================================

#[test]
fn run_writes_all_reports() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "xauusd_m.csv", GOLD_DAILY);
    write(dir.path(), "DGS10.csv", YIELDS_DAILY);

    auric(dir.path())
        .args(["run", "--output-dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold / Bond Ratio"));

    let out = dir.path().join("out");
    for name in [
        "gold_monthly_returns.csv",
        "bonds_monthly_returns.csv",
        "ratio_monthly.csv",
    ] {
        assert!(out.join(name).exists(), "{name} missing");
    }

    let ratio = read_lines(&out.join("ratio_monthly.csv"));
    assert_eq!(ratio.len(), 4);
    assert_eq!(ratio[1], "2024-01-31,100.00000,");
}

#[test]
fn config_init_and_show() {
    let dir = TempDir::new().unwrap();

    auric(dir.path()).args(["config", "init"]).assert().success();
    assert!(dir.path().join("auric.toml").exists());

    auric(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    auric(dir.path())
        .args(["-q", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("window = 84"));

    auric(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout("auric.toml\n");
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();

    auric(dir.path())
        .args(["--config", "missing.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();

    auric(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("gold"))
        .stdout(predicate::str::contains("bond"))
        .stdout(predicate::str::contains("ratio"));
}
