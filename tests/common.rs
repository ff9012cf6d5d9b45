#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use regex::Regex;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("ritinerary")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_ritinerary.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Runs a command against `db_path` and returns its stdout.
pub fn run_ok(db_path: &str, args: &[&str]) -> String {
    let out = rti()
        .args(["--db", db_path])
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&out).to_string()
}

/// Last UUID printed by a command (success lines end with the new id).
pub fn last_id(stdout: &str) -> String {
    let re = Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid regex");
    re.find_iter(stdout)
        .last()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| panic!("no id in output:\n{}", stdout))
}

/// Runs a command and returns the id it printed.
pub fn add(db_path: &str, args: &[&str]) -> String {
    last_id(&run_ok(db_path, args))
}

pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Ids of the small plan created by `init_db_with_plan`.
pub struct Plan {
    pub event: String,
    pub day: String,
    pub hotel: String,
    pub venue: String,
    pub alice: String,
    pub bob: String,
    pub van: String,
    pub visit: String,
    pub transfer: String,
}

/// Initialize DB and add one event day with a block and a movement.
pub fn init_db_with_plan(db_path: &str) -> Plan {
    init_db(db_path);

    let event = add(
        db_path,
        &["event", "add", "Summit", "--start", "2025-06-18", "--end", "2025-06-20"],
    );
    let day = add(db_path, &["day", "add", "--event", &event, "2025-06-18"]);

    let hotel = add(db_path, &["location", "add", "Grand Hotel", "--type", "hotel"]);
    let venue = add(db_path, &["location", "add", "Expo Hall", "--type", "venue"]);

    let alice = add(db_path, &["participant", "add", "Alice", "--role", "guest"]);
    let bob = add(db_path, &["participant", "add", "Bob", "--role", "driver"]);

    let van = add(
        db_path,
        &["vehicle", "add", "Van 1", "--capacity", "6", "--plate", "AB123CD"],
    );

    let visit = add(
        db_path,
        &[
            "block",
            "add",
            "--day",
            &day,
            "--title",
            "Plant visit",
            "--start",
            "10:00",
            "--end",
            "11:30",
            "--location",
            &venue,
            "--participant",
            &alice,
        ],
    );

    let transfer = add(
        db_path,
        &[
            "movement", "add", "--day", &day, "--title", "Transfer", "--from", &hotel, "--to",
            &venue, "--depart", "09:15", "--drive", "30m",
        ],
    );

    Plan {
        event,
        day,
        hotel,
        venue,
        alice,
        bob,
        van,
        visit,
        transfer,
    }
}
