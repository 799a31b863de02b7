use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use callguard_core::audit_files;
use callguard_core::config::AuditConfig;
use callguard_core::input::read_rules;
use callguard_core::report::render;

mod args;

/// Exit status when `--fail-above` is exceeded.
const EXIT_THRESHOLD_EXCEEDED: i32 = 2;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = args::Args::parse();
    init_logging(args.verbose);

    let config = match &args.rules {
        Some(path) => AuditConfig::with_rules(read_rules(path)?),
        None => AuditConfig::default(),
    };

    let report = audit_files(&args.abi_path, &args.queue_path, &config)?;

    let output = match args.format {
        args::OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        args::OutputFormat::Text => render::render_text(&report),
    };

    match &args.out {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("failed to write report: {}", path.display()))?,
        None => {
            print!("{output}");
            std::io::stdout().flush()?;
        }
    }

    if let Some(threshold) = args.fail_above {
        let flagged = report.above(threshold).count();
        if flagged > 0 {
            tracing::warn!(threshold, flagged, "risk threshold exceeded");
            std::process::exit(EXIT_THRESHOLD_EXCEEDED);
        }
    }

    Ok(())
}
