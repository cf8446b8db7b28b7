use std::fs;
use std::path::{Path, PathBuf};

use tabmatch_ingest::{WriteOptions, write_csv};
use tabmatch_map::{ReconcileOptions, Reconciler};
use tabmatch_model::{AppendDirection, KeyColumns};
use tempfile::TempDir;

const REFERENCE: &str = "\
State,City,Population
CA,Los Angeles,3900000
CA,San Diego,1400000
NY,New York,8300000
NY,Buffalo,280000
";

const TARGET: &str = "\
st,town,visits
Calif,Los Angels,10
N.Y.,new york,3
NY,Bufalo,7
,Austin,2
";

fn fixtures() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let reference = dir.path().join("reference.csv");
    let target = dir.path().join("target.csv");
    fs::write(&reference, REFERENCE).expect("write reference");
    fs::write(&target, TARGET).expect("write target");
    (dir, reference, target)
}

fn render(first: &Path, second: &Path, keys: &KeyColumns, direction: AppendDirection) -> String {
    let reconciliation = Reconciler::from_csv(
        first,
        second,
        keys,
        ReconcileOptions::default().with_direction(direction),
    )
    .expect("load")
    .run()
    .expect("run");
    let mut buf = Vec::new();
    write_csv(&reconciliation.table, &mut buf, WriteOptions::default()).expect("render");
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn augmented_target_csv() {
    let (_dir, reference, target) = fixtures();
    let keys = KeyColumns::parse("state,city", "st,town").unwrap();
    let output = render(&reference, &target, &keys, AppendDirection::Second);
    insta::assert_snapshot!(output, @r"
    state,city,visits,state_t,city_t
    Calif,Los Angels,10,CA,Los Angeles
    N.Y.,new york,3,NY,New York
    NY,Bufalo,7,NY,Buffalo
    ,Austin,2,,
    ");
}

#[test]
fn appending_into_first_swaps_files() {
    let (_dir, reference, target) = fixtures();
    let forward = render(
        &reference,
        &target,
        &KeyColumns::parse("state,city", "st,town").unwrap(),
        AppendDirection::Second,
    );
    let backward = render(
        &target,
        &reference,
        &KeyColumns::parse("st,town", "state,city").unwrap(),
        AppendDirection::First,
    );
    assert_eq!(forward, backward);
}

#[test]
fn report_counts() {
    let (_dir, reference, target) = fixtures();
    let keys = KeyColumns::parse("state,city", "st,town").unwrap();
    let reconciliation = Reconciler::from_csv(&reference, &target, &keys, ReconcileOptions::default())
        .expect("load")
        .run()
        .expect("run");
    assert!(!reconciliation.report.fully_resolved());
    insta::assert_json_snapshot!(reconciliation.report, @r#"
    {
      "direction": "second",
      "rows": 4,
      "levels": [
        {
          "column": "state",
          "resolved_column": "state_t",
          "exact": 1,
          "fuzzy": 2,
          "unresolved": 1,
          "partitions": 1,
          "unmatched_partitions": 0
        },
        {
          "column": "city",
          "resolved_column": "city_t",
          "exact": 0,
          "fuzzy": 3,
          "unresolved": 1,
          "partitions": 2,
          "unmatched_partitions": 0
        }
      ]
    }
    "#);
}

#[test]
fn save_writes_destination() {
    let (dir, reference, target) = fixtures();
    let keys = KeyColumns::parse("state", "st").unwrap();
    let destination = dir.path().join("output.csv");
    Reconciler::from_csv(&reference, &target, &keys, ReconcileOptions::default())
        .expect("load")
        .run()
        .expect("run")
        .save(&destination, WriteOptions { include_index: true })
        .expect("save");
    let written = fs::read_to_string(&destination).expect("read output");
    assert_eq!(
        written.lines().next(),
        Some(",state,town,visits,state_t")
    );
    assert_eq!(written.lines().nth(1), Some("0,Calif,Los Angels,10,CA"));
}
