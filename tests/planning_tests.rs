use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add, init_db, init_db_with_plan, rti, run_ok, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates_database");

    rti()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_event_and_days_listing() {
    let db_path = setup_test_db("event_and_days_listing");
    init_db(&db_path);

    let event = add(
        &db_path,
        &["event", "add", "Summit", "--start", "2025-06-18", "--end", "2025-06-20"],
    );

    rti()
        .args(["--db", &db_path, "day", "add", "--event", &event, "2025-06-18..2025-06-20"])
        .assert()
        .success()
        .stdout(contains("2025-06-18"))
        .stdout(contains("2025-06-19"))
        .stdout(contains("2025-06-20"));

    rti()
        .args(["--db", &db_path, "event", "list"])
        .assert()
        .success()
        .stdout(contains("Summit"));

    rti()
        .args(["--db", &db_path, "day", "list", "--event", &event])
        .assert()
        .success()
        .stdout(contains("2025-06-19"));
}

#[test]
fn test_day_outside_event_is_still_added() {
    let db_path = setup_test_db("day_outside_event");
    init_db(&db_path);

    let event = add(
        &db_path,
        &["event", "add", "Summit", "--start", "2025-06-18", "--end", "2025-06-20"],
    );

    rti()
        .args(["--db", &db_path, "day", "add", "--event", &event, "2025-07-01"])
        .assert()
        .success()
        .stdout(contains("2025-07-01"));
}

#[test]
fn test_day_for_unknown_event_fails() {
    let db_path = setup_test_db("day_unknown_event");
    init_db(&db_path);

    rti()
        .args(["--db", &db_path, "day", "add", "--event", "nope", "2025-06-18"])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn test_day_show_merges_blocks_and_movements() {
    let db_path = setup_test_db("day_show_timeline");
    let plan = init_db_with_plan(&db_path);

    let out = run_ok(&db_path, &["day", "show", &plan.day]);

    // Movement departs at 09:15, before the 10:00 block.
    let transfer = out.find("Transfer").expect("movement row");
    let visit = out.find("Plant visit").expect("block row");
    assert!(transfer < visit);

    assert!(out.contains("09:45"));
    assert!(out.contains("11:30"));
    assert!(out.contains("Expo Hall"));
    assert!(out.contains("Alice"));
}

#[test]
fn test_driving_arrival_wraps_past_midnight() {
    let db_path = setup_test_db("driving_wraps_midnight");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args([
            "--db", &db_path, "movement", "add", "--day", &plan.day, "--title", "Night ride",
            "--from", &plan.venue, "--to", &plan.hotel, "--depart", "23:30", "--drive", "1h15m",
        ])
        .assert()
        .success()
        .stdout(contains("23:30 → 00:45"));

    rti()
        .args(["--db", &db_path, "day", "show", &plan.day])
        .assert()
        .success()
        .stdout(contains("Night ride"))
        .stdout(contains("00:45"));
}

#[test]
fn test_movement_switches_between_fixed_and_driving() {
    let db_path = setup_test_db("movement_arrival_modes");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args(["--db", &db_path, "movement", "edit", &plan.transfer, "--arrive", "10:05"])
        .assert()
        .success()
        .stdout(contains("09:15 → 10:05"));

    rti()
        .args(["--db", &db_path, "movement", "edit", &plan.transfer, "--drive", "1:10"])
        .assert()
        .success()
        .stdout(contains("09:15 → 10:25"));

    rti()
        .args(["--db", &db_path, "movement", "show", &plan.transfer])
        .assert()
        .success()
        .stdout(contains("Grand Hotel → Expo Hall"))
        .stdout(contains("drive"));
}

#[test]
fn test_bad_times_are_rejected() {
    let db_path = setup_test_db("bad_times_rejected");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args([
            "--db", &db_path, "block", "add", "--day", &plan.day, "--title", "X", "--start",
            "25:00",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid time format"));

    rti()
        .args(["--db", &db_path, "movement", "edit", &plan.transfer, "--drive", "soon"])
        .assert()
        .failure()
        .stderr(contains("Invalid driving duration"));

    for drive in ["1:-30", "2h-30m", "999999999999999999h"] {
        rti()
            .args(["--db", &db_path, "movement", "edit", &plan.transfer, "--drive", drive])
            .assert()
            .failure()
            .stderr(contains("Invalid driving duration"));
    }

    rti()
        .args(["--db", &db_path, "movement", "show", &plan.transfer])
        .assert()
        .success()
        .stdout(contains("09:15 → 09:45"));
}

#[test]
fn test_block_end_follows_schedule_items() {
    let db_path = setup_test_db("block_auto_end");
    let plan = init_db_with_plan(&db_path);

    let lunch = add(
        &db_path,
        &[
            "block", "add", "--day", &plan.day, "--type", "break", "--title", "Lunch",
            "--start", "12:30",
        ],
    );

    for time in ["12:30", "13:40", "13:05"] {
        rti()
            .args([
                "--db", &db_path, "block", "item", "add", "--block", &lunch, "--time", time,
                "--description", "course",
            ])
            .assert()
            .success();
    }

    rti()
        .args(["--db", &db_path, "block", "show", &lunch])
        .assert()
        .success()
        .stdout(contains("13:40"));

    // A fixed end overrides the items, --auto-end goes back to them.
    rti()
        .args(["--db", &db_path, "block", "edit", &lunch, "--end", "14:00"])
        .assert()
        .success()
        .stdout(contains("ends 14:00"));

    rti()
        .args(["--db", &db_path, "block", "edit", &lunch, "--auto-end"])
        .assert()
        .success()
        .stdout(contains("ends 13:40"));
}

#[test]
fn test_block_delete_unlinks_participants() {
    let db_path = setup_test_db("block_delete_unlinks");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args(["--db", &db_path, "participant", "show", &plan.alice])
        .assert()
        .success()
        .stdout(contains("Plant visit"));

    rti()
        .args(["--db", &db_path, "block", "del", &plan.visit])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "participant", "show", &plan.alice])
        .assert()
        .success()
        .stdout(contains("Not assigned to any block."));
}

#[test]
fn test_participant_delete_removes_assignments() {
    let db_path = setup_test_db("participant_delete_unlinks");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args(["--db", &db_path, "participant", "del", &plan.alice])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "block", "show", &plan.visit])
        .assert()
        .success()
        .stdout(contains("Alice").not());
}

#[test]
fn test_vehicle_assignment_over_capacity_warns() {
    let db_path = setup_test_db("vehicle_over_capacity");
    let plan = init_db_with_plan(&db_path);

    let scooter = add(&db_path, &["vehicle", "add", "Scooter", "--capacity", "1"]);

    rti()
        .args([
            "--db",
            &db_path,
            "movement",
            "assign",
            &plan.transfer,
            "--vehicle",
            &scooter,
            "--driver",
            &plan.bob,
            "--passenger",
            &format!("{},{}", plan.alice, plan.bob),
        ])
        .assert()
        .success()
        .stdout(contains("assigned"))
        .stdout(contains("has 1 seats"));

    rti()
        .args(["--db", &db_path, "movement", "show", &plan.transfer])
        .assert()
        .success()
        .stdout(contains("Scooter"))
        .stdout(contains("driver: Bob"));

    rti()
        .args([
            "--db", &db_path, "movement", "unassign", &plan.transfer, "--vehicle", &scooter,
        ])
        .assert()
        .success()
        .stdout(contains("removed"));

    rti()
        .args(["--db", &db_path, "movement", "show", &plan.transfer])
        .assert()
        .success()
        .stdout(contains("Scooter").not());
}

#[test]
fn test_agenda_and_personal_day_view() {
    let db_path = setup_test_db("agenda_personal_view");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args([
            "--db", &db_path, "movement", "assign", &plan.transfer, "--vehicle", &plan.van,
            "--driver", &plan.bob,
        ])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "agenda", "--participant", &plan.alice])
        .assert()
        .success()
        .stdout(contains("Plant visit"))
        .stdout(contains("participant"));

    // Bob only drives: the transfer is in his day, the visit is not.
    rti()
        .args([
            "--db", &db_path, "agenda", "--participant", &plan.bob, "--day", &plan.day,
        ])
        .assert()
        .success()
        .stdout(contains("Transfer"))
        .stdout(contains("Plant visit").not());

    rti()
        .args(["--db", &db_path, "agenda", "--participant", &plan.bob])
        .assert()
        .success()
        .stdout(contains("No blocks assigned."));
}

#[test]
fn test_event_delete_cascades_to_days() {
    let db_path = setup_test_db("event_delete_cascades");
    let plan = init_db_with_plan(&db_path);

    rti()
        .args(["--db", &db_path, "event", "del", &plan.event])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "day", "list"])
        .assert()
        .success()
        .stdout(contains("No days."));

    rti()
        .args(["--db", &db_path, "block", "show", &plan.visit])
        .assert()
        .failure()
        .stderr(contains("not found"));
}
