use super::*;

#[test]
fn parses_bare_run_command() {
    let cli = Cli::try_parse_from(["stockcmp", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Run {
            region: None,
            dry_run: false,
            snapshot: false,
            output_dir: None,
            format: ReportFormat::Xlsx,
        }
    ));
}

#[test]
fn parses_run_with_region_and_flags() {
    let cli = Cli::try_parse_from([
        "stockcmp",
        "run",
        "--region",
        "seattle",
        "--dry-run",
        "--snapshot",
        "--output-dir",
        "/tmp/reports",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Run {
            region: Some(ref r),
            dry_run: true,
            snapshot: true,
            output_dir: Some(ref d),
            format: ReportFormat::Xlsx,
        } if r == "seattle" && d == &PathBuf::from("/tmp/reports")
    ));
}

#[test]
fn parses_compare_command() {
    let cli = Cli::try_parse_from(["stockcmp", "compare", "--la", "la.json", "--sa", "sa.json"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Compare {
            ref la,
            ref sa,
            output_dir: None,
            format: ReportFormat::Xlsx,
        } if la == &PathBuf::from("la.json") && sa == &PathBuf::from("sa.json")
    ));
}

#[test]
fn format_flag_selects_csv() {
    let cli = Cli::try_parse_from([
        "stockcmp", "compare", "--la", "la.json", "--sa", "sa.json", "--format", "csv",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Compare {
            format: ReportFormat::Csv,
            ..
        }
    ));
}

#[test]
fn unknown_format_is_rejected() {
    assert!(Cli::try_parse_from(["stockcmp", "run", "--format", "ods"]).is_err());
}

#[test]
fn compare_requires_both_snapshots() {
    let result = Cli::try_parse_from(["stockcmp", "compare", "--la", "la.json"]);
    assert!(result.is_err());
}

#[test]
fn parses_regions_command() {
    let cli = Cli::try_parse_from(["stockcmp", "regions"]).unwrap();
    assert!(matches!(cli.command, Commands::Regions));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["stockcmp"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["stockcmp", "collect"]).is_err());
}
