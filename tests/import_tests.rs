use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, rti, run_ok, setup_test_db, temp_out};

const LEGACY_STORE: &str = r#"{
  "version": 1,
  "events": [
    {"id": "ev-1", "name": "Roadshow", "startDate": "2025-09-01", "endDate": "2025-09-02"}
  ],
  "participants": [
    {"id": "p-ana", "name": "Ana", "roles": ["guest"], "assignedBlockIds": ["b-visit"]}
  ],
  "locations": [
    {"id": "l-hotel", "name": "Harbour Hotel", "type": "hotel"},
    {"id": "l-site", "name": "Shipyard", "type": "venue"}
  ],
  "days": [
    {
      "id": "d-1",
      "eventId": "ev-1",
      "date": "2025-09-01",
      "blocks": [
        {
          "id": "b-visit", "type": "activity", "title": "Shipyard tour",
          "startTime": "10:00", "locationId": "l-site",
          "participantsIds": ["p-ana", "p-ghost"],
          "scheduleItems": [
            {"id": "s-1", "time": "10:00", "description": "Welcome"},
            {"id": "s-2", "time": "11:15", "description": "Dock walk"}
          ]
        },
        {
          "id": "b-move", "type": "movement", "title": "Shuttle",
          "startTime": "09:00", "endTime": "09:40",
          "locationStartId": "l-hotel", "locationEndId": "l-site"
        }
      ],
      "movements": [
        {
          "id": "m-night", "title": "Late return",
          "fromLocationId": "l-site", "toLocationId": "l-hotel",
          "fromTime": "23:00", "fromTimeType": "fixed",
          "toTimeType": "driving", "toTime": "90"
        }
      ]
    }
  ]
}"#;

#[test]
fn test_import_legacy_store() {
    let db_path = setup_test_db("import_legacy_store");
    init_db(&db_path);

    let file = temp_out("import_legacy_store", "json");
    fs::write(&file, LEGACY_STORE).expect("write store");

    rti()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success()
        .stdout(contains("Store migration applied"))
        .stdout(contains("p-ghost"))
        .stdout(contains("Imported 1 events, 1 days"));

    let out = run_ok(&db_path, &["day", "show", "d-1"]);

    // Legacy movement block became a movement, ordered before the tour.
    let shuttle = out.find("Shuttle").expect("converted movement");
    let tour = out.find("Shipyard tour").expect("block");
    assert!(shuttle < tour);

    assert!(out.contains("09:40"));
    assert!(out.contains("11:15"));
    assert!(out.contains("00:30"));
}

#[test]
fn test_import_keeps_participant_links() {
    let db_path = setup_test_db("import_participant_links");
    init_db(&db_path);

    let file = temp_out("import_participant_links", "json");
    fs::write(&file, LEGACY_STORE).expect("write store");

    rti()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "participant", "show", "p-ana"])
        .assert()
        .success()
        .stdout(contains("Shipyard tour"));
}

#[test]
fn test_import_twice_is_rejected() {
    let db_path = setup_test_db("import_twice");
    init_db(&db_path);

    let file = temp_out("import_twice", "json");
    fs::write(&file, LEGACY_STORE).expect("write store");

    rti()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .success();

    rti()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn test_import_newer_store_fails() {
    let db_path = setup_test_db("import_newer_store");
    init_db(&db_path);

    let file = temp_out("import_newer_store", "json");
    fs::write(&file, r#"{"version": 42, "days": []}"#).expect("write store");

    rti()
        .args(["--db", &db_path, "import", "--file", &file])
        .assert()
        .failure()
        .stderr(contains("newer than supported"));
}

#[test]
fn test_export_json_can_be_imported_elsewhere() {
    let src_db = setup_test_db("roundtrip_src");
    init_db(&src_db);

    let store = temp_out("roundtrip_store", "json");
    fs::write(&store, LEGACY_STORE).expect("write store");
    run_ok(&src_db, &["import", "--file", &store]);

    let days_json = temp_out("roundtrip_days", "json");
    run_ok(
        &src_db,
        &["export", "--format", "json", "--file", &days_json, "--force"],
    );

    // A bare array of days needs its event and references in place.
    let dst_db = setup_test_db("roundtrip_dst");
    init_db(&dst_db);
    let seed = temp_out("roundtrip_seed", "json");
    fs::write(
        &seed,
        r#"{"version": 2,
            "events": [{"id": "ev-1", "name": "Roadshow", "startDate": "2025-09-01", "endDate": "2025-09-02"}],
            "locations": [{"id": "l-hotel", "name": "Harbour Hotel"}, {"id": "l-site", "name": "Shipyard"}]}"#,
    )
    .expect("write seed");
    run_ok(&dst_db, &["import", "--file", &seed]);

    rti()
        .args(["--db", &dst_db, "import", "--file", &days_json])
        .assert()
        .success()
        .stdout(contains("1 days"));

    rti()
        .args(["--db", &dst_db, "day", "show", "d-1"])
        .assert()
        .success()
        .stdout(contains("Late return"))
        .stdout(contains("Shipyard tour"));
}

#[test]
fn test_reimporting_exported_days_is_rejected() {
    let db_path = setup_test_db("reimport_days");
    init_db(&db_path);

    let store = temp_out("reimport_days_store", "json");
    fs::write(&store, LEGACY_STORE).expect("write store");
    run_ok(&db_path, &["import", "--file", &store]);

    let days_json = temp_out("reimport_days_export", "json");
    run_ok(
        &db_path,
        &["export", "--format", "json", "--file", &days_json, "--force"],
    );

    rti()
        .args(["--db", &db_path, "import", "--file", &days_json])
        .assert()
        .failure()
        .stderr(contains("Day d-1 already exists"));
}
