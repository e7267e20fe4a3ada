use std::path::PathBuf;
use std::process::ExitCode;

use amqp_codec::fixtures::FixtureDir;
use amqp_codec::{interop, json, Decoder};
use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::WarnLevel;


/// Runs the codec interop checks against a tests directory.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// directory containing interop/<name>.amqp fixtures; defaults to $AMQP_CODEC_TESTS_DIR
    #[arg(value_name = "TESTS_DIR")]
    tests_dir: Option<PathBuf>,

    /// run a single check
    #[arg(long, value_name = "CHECK")]
    only: Option<String>,

    /// print a fixture's decoded stream instead of running checks
    #[arg(long, value_name = "FIXTURE", conflicts_with = "only")]
    dump: Option<String>,

    /// with --dump, print json instead of text
    #[arg(long, requires = "dump")]
    json: bool,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .init();

    let dir = FixtureDir::resolve(cli.tests_dir)?;

    if let Some(name) = cli.dump {
        let bytes = dir.read(&name)?;
        if cli.json {
            let doc = json::decode_json(&bytes).with_context(|| format!("decoding {name}"))?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        else {
            println!("{}", Decoder::new(bytes));
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(only) = &cli.only {
        if !interop::CHECKS.iter().any(|(name, _)| name == only) {
            anyhow::bail!("unknown check {only}");
        }
    }

    let outcomes = interop::run(&dir, cli.only.as_deref());
    for outcome in outcomes.iter().filter(|outcome| !outcome.passed()) {
        println!("{}", outcome);
    }

    let failed = interop::failures(&outcomes);
    Ok(ExitCode::from(failed.min(u8::MAX as usize) as u8))
}
