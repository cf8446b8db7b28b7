//! End-to-end tests for the reconcile command.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use tabmatch_cli::cli::{AppendArg, Cli};
use tabmatch_cli::commands::{Outcome, run_reconcile, validate_inputs};

const STATES: &str = "\
State,City
CA,Los Angeles
CA,San Diego
NY,New York
";

const VISITS: &str = "\
Region,Town,Visits
Calif,San Deigo,4
N.Y.,new york,9
";

struct Fixture {
    dir: TempDir,
    first: PathBuf,
    second: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let first = dir.path().join("states.csv");
        let second = dir.path().join("visits.csv");
        fs::write(&first, STATES).expect("write first");
        fs::write(&second, VISITS).expect("write second");
        Self { dir, first, second }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn cli(&self, destination: &Path, extra: &[&str]) -> Cli {
        let mut argv = vec![
            "tabmatch".to_string(),
            "--firstcsv".to_string(),
            self.first.display().to_string(),
            "--secondcsv".to_string(),
            self.second.display().to_string(),
            "--destination".to_string(),
            destination.display().to_string(),
            "--commoncolumns1".to_string(),
            "State, City".to_string(),
            "--commoncolumns2".to_string(),
            "region,TOWN".to_string(),
        ];
        argv.extend(extra.iter().map(|s| (*s).to_string()));
        Cli::try_parse_from(argv).expect("parse args")
    }
}

fn run(cli: &Cli, answer: &str) -> (Outcome, String) {
    let mut shown = Vec::new();
    let outcome = run_reconcile(&cli.reconcile, false, answer.as_bytes(), &mut shown)
        .expect("run reconcile");
    (outcome, String::from_utf8(shown).expect("utf8"))
}

#[test]
fn defaults_match_the_original_flags() {
    let cli = Cli::try_parse_from([
        "tabmatch",
        "--firstcsv",
        "a.csv",
        "--secondcsv",
        "b.csv",
        "--commoncolumns1",
        "x",
        "--commoncolumns2",
        "y",
    ])
    .expect("parse args");
    assert_eq!(cli.reconcile.destination, PathBuf::from("output.csv"));
    assert_eq!(cli.reconcile.append_in, AppendArg::Second);
    assert!(!cli.reconcile.yes);
}

#[test]
fn rejects_unknown_direction() {
    let result = Cli::try_parse_from([
        "tabmatch",
        "--firstcsv",
        "a.csv",
        "--secondcsv",
        "b.csv",
        "--commoncolumns1",
        "x",
        "--commoncolumns2",
        "y",
        "--in",
        "third",
    ]);
    assert!(result.is_err());
}

#[test]
fn writes_augmented_second_table() {
    let fixture = Fixture::new();
    let destination = fixture.path("out.csv");
    let cli = fixture.cli(&destination, &[]);
    let (outcome, shown) = run(&cli, "");
    assert!(shown.is_empty());
    match outcome {
        Outcome::Completed(result) => {
            assert_eq!(result.destination.as_deref(), Some(destination.as_path()));
            assert!(result.report.fully_resolved());
        }
        Outcome::Declined => panic!("nothing to decline"),
    }
    let written = fs::read_to_string(&destination).expect("read output");
    insta::assert_snapshot!(written, @r"
    state,city,visits,state_t,city_t
    Calif,San Deigo,4,CA,San Diego
    N.Y.,new york,9,NY,New York
    ");
}

#[test]
fn appends_into_first_table() {
    let fixture = Fixture::new();
    let destination = fixture.path("out.csv");
    let cli = fixture.cli(&destination, &["--in", "first"]);
    run(&cli, "");
    let written = fs::read_to_string(&destination).expect("read output");
    let header = written.lines().next().expect("header");
    assert_eq!(header, "region,town,region_t,town_t");
}

#[test]
fn missing_file_is_fatal() {
    let fixture = Fixture::new();
    let mut cli = fixture.cli(&fixture.path("out.csv"), &[]);
    cli.reconcile.second_csv = fixture.path("absent.csv");
    let err = validate_inputs(&cli.reconcile).unwrap_err();
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn missing_columns_are_listed() {
    let fixture = Fixture::new();
    let mut cli = fixture.cli(&fixture.path("out.csv"), &[]);
    cli.reconcile.common_columns_2 = "region,county".to_string();
    let err = validate_inputs(&cli.reconcile).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("county"), "{message}");
    assert!(message.contains("visits.csv"), "{message}");
}

#[test]
fn unequal_key_lists_are_fatal() {
    let fixture = Fixture::new();
    let mut cli = fixture.cli(&fixture.path("out.csv"), &[]);
    cli.reconcile.common_columns_2 = "region".to_string();
    assert!(validate_inputs(&cli.reconcile).is_err());
}

#[test]
fn declined_overwrite_leaves_destination_alone() {
    let fixture = Fixture::new();
    let destination = fixture.path("out.csv");
    fs::write(&destination, "keep me\n").expect("seed destination");
    let cli = fixture.cli(&destination, &[]);
    let (outcome, shown) = run(&cli, "n\n");
    assert!(matches!(outcome, Outcome::Declined));
    assert!(shown.contains("already exists"));
    assert!(shown.contains("different destination"));
    assert_eq!(fs::read_to_string(&destination).unwrap(), "keep me\n");
}

#[test]
fn accepted_overwrite_replaces_destination() {
    let fixture = Fixture::new();
    let destination = fixture.path("out.csv");
    fs::write(&destination, "old\n").expect("seed destination");
    let cli = fixture.cli(&destination, &[]);
    let (outcome, _) = run(&cli, "y\n");
    assert!(matches!(outcome, Outcome::Completed(_)));
    assert!(fs::read_to_string(&destination).unwrap().starts_with("state,"));
}

#[test]
fn yes_flag_skips_the_prompt() {
    let fixture = Fixture::new();
    let destination = fixture.path("out.csv");
    fs::write(&destination, "old\n").expect("seed destination");
    let cli = fixture.cli(&destination, &["-y", "--index"]);
    let (_, shown) = run(&cli, "");
    assert!(shown.is_empty());
    assert!(fs::read_to_string(&destination).unwrap().starts_with(",state,"));
}

#[test]
fn dry_run_writes_nothing() {
    let fixture = Fixture::new();
    let destination = fixture.path("out.csv");
    let report = fixture.path("report.json");
    let report_arg = report.display().to_string();
    let cli = fixture.cli(&destination, &["--dry-run", "--summary-json", &report_arg]);
    let (outcome, _) = run(&cli, "");
    match outcome {
        Outcome::Completed(result) => assert!(result.destination.is_none()),
        Outcome::Declined => panic!("nothing to decline"),
    }
    assert!(!destination.exists());
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).expect("report json");
    assert_eq!(json["rows"], 2);
    assert_eq!(json["levels"][1]["column"], "city");
}
