use std::path::Path;

use super::*;

#[test]
fn parses_load_with_defaults() {
    let cli = Cli::try_parse_from(["catload", "load"]).expect("expected valid cli args");

    let Commands::Load(args) = cli.command;
    assert!(!args.dry_run);
    assert!(args.concurrency.is_none());
    assert!(args.report.is_none());
}

#[test]
fn parses_load_with_all_flags() {
    let cli = Cli::try_parse_from([
        "catload",
        "load",
        "--dump",
        "data/dump.json",
        "--schema",
        "schema.yaml",
        "--concurrency",
        "4",
        "--dry-run",
        "--report",
        "out.json",
    ])
    .expect("expected valid cli args");

    let Commands::Load(args) = cli.command;
    assert_eq!(args.dump, Path::new("data/dump.json"));
    assert_eq!(args.schema, Path::new("schema.yaml"));
    assert_eq!(args.concurrency, Some(4));
    assert!(args.dry_run);
    assert_eq!(args.report.as_deref(), Some(Path::new("out.json")));
}

#[test]
fn rejects_non_numeric_concurrency() {
    let result = Cli::try_parse_from(["catload", "load", "--concurrency", "many"]);
    assert!(result.is_err());
}

#[test]
fn requires_a_subcommand() {
    assert!(Cli::try_parse_from(["catload"]).is_err());
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["catload", "sync"]).is_err());
}
