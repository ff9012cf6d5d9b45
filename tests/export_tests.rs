use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_plan, rti, setup_test_db, temp_out};

#[test]
fn test_export_csv_all_days() {
    let db_path = setup_test_db("export_csv_all");
    init_db_with_plan(&db_path);

    let out = temp_out("export_csv_all", "csv");

    rti()
        .args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("2025-06-18"));
    assert!(content.contains("Plant visit"));
    assert!(content.contains("Transfer"));
    assert!(content.contains("09:45"));
}

#[test]
fn test_export_json_event_filter() {
    let db_path = setup_test_db("export_json_event");
    let plan = init_db_with_plan(&db_path);

    let out = temp_out("export_json_event", "json");

    rti()
        .args([
            "--db", &db_path, "export", "--format", "json", "--file", &out, "--event",
            &plan.event,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert!(content.contains(&plan.day));
    assert!(content.contains("Plant visit"));
    assert!(json.to_string().contains("2025-06-18"));
}

#[test]
fn test_export_personal_itinerary() {
    let db_path = setup_test_db("export_personal");
    let plan = init_db_with_plan(&db_path);

    let out = temp_out("export_personal", "csv");

    rti()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--participant",
            &plan.alice,
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Plant visit"));
    assert!(!content.contains("Transfer"));
}

#[test]
fn test_export_without_matching_days_writes_nothing() {
    let db_path = setup_test_db("export_no_days");
    let plan = init_db_with_plan(&db_path);

    let out = temp_out("export_no_days", "csv");

    // Bob has no block and rides in no vehicle yet.
    rti()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--participant",
            &plan.bob,
        ])
        .assert()
        .success()
        .stdout(contains("No days found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_xlsx_and_pdf() {
    let db_path = setup_test_db("export_xlsx_pdf");
    init_db_with_plan(&db_path);

    for (format, ext) in [("xlsx", "xlsx"), ("pdf", "pdf")] {
        let out = temp_out("export_xlsx_pdf", ext);

        rti()
            .args(["--db", &db_path, "export", "--format", format, "--file", &out])
            .assert()
            .success();

        let meta = fs::metadata(&out).expect("exported file exists");
        assert!(meta.len() > 0);
    }

    let pdf = fs::read(temp_out_existing("export_xlsx_pdf", "pdf")).expect("read pdf");
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_export_overwrite_requires_force() {
    let db_path = setup_test_db("export_force");
    init_db_with_plan(&db_path);

    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").expect("seed file");

    rti()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_ne!(content, "old");
}

#[test]
fn test_export_relative_path_fails() {
    let db_path = setup_test_db("export_relative");
    init_db_with_plan(&db_path);

    rti()
        .args([
            "--db", &db_path, "export", "--format", "csv", "--file", "relative/out.csv",
        ])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

/// Path of an output written earlier in the same test (not removed).
fn temp_out_existing(name: &str, ext: &str) -> String {
    std::env::temp_dir()
        .join(format!("{}_out.{}", name, ext))
        .to_string_lossy()
        .to_string()
}
