use truthcart_core::AnalysisMode;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["truthcart-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_analyze_with_request_file() {
    let cli = Cli::try_parse_from(["truthcart-cli", "analyze", "--request", "req.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze(ref args))
            if args.request.as_deref() == Some(std::path::Path::new("req.json"))
                && args.batch.is_none()
                && !args.json
    ));
}

#[test]
fn parses_analyze_with_batch_and_identity() {
    let cli = Cli::try_parse_from([
        "truthcart-cli",
        "analyze",
        "--batch",
        "batch.json",
        "--product-name",
        "Acme Kettle",
        "--product-url",
        "https://shop.example/kettle",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze(ref args))
            if args.batch.is_some()
                && args.product_name.as_deref() == Some("Acme Kettle")
                && args.json
    ));
}

#[test]
fn analyze_rejects_request_and_batch_together() {
    let result = Cli::try_parse_from([
        "truthcart-cli",
        "analyze",
        "--request",
        "req.json",
        "--batch",
        "batch.json",
    ]);
    assert!(result.is_err(), "expected conflict, got: {result:?}");
}

#[test]
fn analyze_mode_defaults_to_fast() {
    let cli = Cli::try_parse_from(["truthcart-cli", "analyze", "--request", "req.json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze(ref args)) if args.mode == AnalysisMode::Fast
    ));
}

#[test]
fn parses_deep_mode() {
    let cli = Cli::try_parse_from([
        "truthcart-cli",
        "analyze",
        "--request",
        "req.json",
        "--mode",
        "deep",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze(ref args)) if args.mode == AnalysisMode::Deep
    ));
}

#[test]
fn rejects_unknown_mode() {
    let result = Cli::try_parse_from([
        "truthcart-cli",
        "analyze",
        "--request",
        "req.json",
        "--mode",
        "thorough",
    ]);
    assert!(result.is_err(), "expected parse failure, got: {result:?}");
}

#[test]
fn parses_fetch_with_identity_flags() {
    let cli = Cli::try_parse_from([
        "truthcart-cli",
        "fetch",
        "--product-name",
        "Acme Kettle",
        "--product-url",
        "https://shop.example/kettle",
        "--brand-name",
        "Acme",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Fetch(ref args))
            if args.product_name == "Acme Kettle"
                && args.brand_name.as_deref() == Some("Acme")
                && args.mode == AnalysisMode::Fast
    ));
}

#[test]
fn fetch_requires_product_identity() {
    let result = Cli::try_parse_from(["truthcart-cli", "fetch", "--product-name", "Acme Kettle"]);
    assert!(result.is_err(), "expected missing --product-url error");
}
