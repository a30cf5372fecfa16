//! Demonstration driver for the uv-args engine.
//!
//! Registers a realistic argument set, parses the process command line
//! against it, and prints the bound values plus the parse report. Pass
//! `--help` for the rendered help listing, `--raw` for the report as
//! compact JSON, and set RUST_LOG=debug to trace the parse.

use colored::Colorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use uv_args::{
    ArgParser, ArgRef, ArgSpec, FloatConvert, IntConvert, OnOffConvert, ShowIn, StringConvert,
};

fn build_parser() -> anyhow::Result<(ArgParser, Bound)> {
    let bound = Bound {
        input: ArgRef::new(String::new()),
        output: ArgRef::new(String::new()),
        threads: ArgRef::new(0),
        timeout: ArgRef::new(0.0),
        log_level: ArgRef::new(String::new()),
        dry_run: ArgRef::new(false),
    };

    let mut parser = ArgParser::new("uv-args-demo")
        .description("Exercise the uv-args engine against a realistic argument set")
        .epilog("Set RUST_LOG=debug to trace the parse.");

    parser.register(
        ArgSpec::positional("input", &bound.input, StringConvert).help("Input file to process"),
    )?;
    parser.register(
        ArgSpec::option("--output", &bound.output, StringConvert)
            .short('o')
            .default_value("out.json")
            .help("Where results are written"),
    )?;
    parser.register(
        ArgSpec::option("--threads", &bound.threads, IntConvert)
            .default_value("1")
            .help("Worker threads to run"),
    )?;
    parser.register(
        ArgSpec::option("--timeout", &bound.timeout, FloatConvert)
            .default_value("30.0")
            .show_in(ShowIn::HelpOnly)
            .help("Seconds before giving up"),
    )?;
    parser.register(
        ArgSpec::option("--log-level", &bound.log_level, StringConvert)
            .choices(["error", "warn", "info", "debug"])
            .default_value("info")
            .help("Verbosity of the run log"),
    )?;
    parser.register(
        ArgSpec::flag("--dry-run", &bound.dry_run, OnOffConvert)
            .default_value("off")
            .help("Plan the run without executing it"),
    )?;

    Ok((parser, bound))
}

struct Bound {
    input: ArgRef<String>,
    output: ArgRef<String>,
    threads: ArgRef<i64>,
    timeout: ArgRef<f64>,
    log_level: ArgRef<String>,
    dry_run: ArgRef<bool>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (parser, bound) = build_parser()?;

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help") {
        println!("{}", parser.format_help());
        return Ok(());
    }
    let raw_output = args.iter().any(|a| a == "--raw");
    args.retain(|a| a != "--raw");

    debug!(tokens = args.len(), "parsing command line");
    let report = match parser.parse(&args) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            eprintln!("{}", parser.format_usage());
            std::process::exit(2);
        }
    };
    info!(
        supplied = report.supplied_names().len(),
        threads = bound.threads.get(),
        timeout = bound.timeout.get(),
        "command line bound"
    );

    // Every bound value in raw form, defaulted or explicit
    for spec in parser.registry().iter() {
        let origin = if report.supplied(spec.name()) {
            "supplied"
        } else {
            "defaulted"
        };
        println!("{:<12} {:<10} = {}", spec.name(), origin, spec.render_bound());
    }
    if bound.dry_run.get() {
        println!("{}", "dry run only, nothing executed".yellow());
    }

    // Print the report the way uv tools do: raw or pretty JSON
    if raw_output {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
