//! Pokedex seeder.
//!
//! Fetches species and evolution data from PokeAPI and writes the pokedex
//! consumed by the battle server.
//!
//! Usage:
//!   cargo run -p pokedex_seed
//!   cargo run -p pokedex_seed -- --gen=3
//!   cargo run -p pokedex_seed -- -g=1 --output ../server/data/pokedex.json

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex_seed::{seed, Generation, GenerationScope, HttpPokeApi, RunSummary, SeedConfig};

#[derive(Parser, Debug)]
#[command(name = "pokedex_seed", version, about)]
struct Cli {
    /// Refresh only this generation (1-9). Without it every generation is refetched.
    #[arg(short = 'g', long = "gen", value_parser = clap::value_parser!(u8).range(1..=9))]
    generation: Option<u8>,

    /// Pokedex file to write (default: data/pokedex.json or $POKEDEX_OUTPUT)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PokeAPI root (default: https://pokeapi.co/api/v2 or $POKEAPI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Pause between upstream calls in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            process::exit(parse_exit_code(&e));
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SeedConfig::from_env().context("invalid environment configuration")?;
    let (scope, config) = resolve(cli, config);
    let api = HttpPokeApi::from_config(&config)?;

    // Species and roster failures are reported, not fatal.
    let summary = seed(&api, scope, &config)
        .await
        .context("seeding aborted")?;

    print_summary(&summary);
    Ok(())
}

/// Exit status for a failed parse. `--help` and `--version` are not errors;
/// anything else exits 1 rather than clap's usual 2.
fn parse_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() {
        1
    } else {
        0
    }
}

/// Apply command-line overrides on top of `config` and pick the scope.
fn resolve(cli: Cli, mut config: SeedConfig) -> (GenerationScope, SeedConfig) {
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.request_delay = Duration::from_millis(delay_ms);
    }

    let scope = GenerationScope::from_selector(cli.generation.and_then(Generation::new));
    (scope, config)
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== Pokedex Seed Summary ===");
    for report in &summary.reports {
        match &report.roster_error {
            Some(error) => println!("Gen {}:  skipped, roster unavailable ({})", report.generation, error),
            None => println!(
                "Gen {}:  {} ok, {} failed ({} degraded, {} skipped)",
                report.generation,
                report.stats.successes,
                report.stats.failures,
                report.stats.degraded,
                report.stats.dropped()
            ),
        }
    }
    println!("Records:  {}", summary.records_written);
    println!("Written:  {}", summary.output_path.display());
    println!("============================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pokedex_seed").chain(args.iter().copied()))
    }

    fn scope_of(args: &[&str]) -> GenerationScope {
        resolve(parse(args).unwrap(), SeedConfig::default()).0
    }

    #[test]
    fn test_generation_selector_forms() {
        let gen3 = GenerationScope::Single(Generation::new(3).unwrap());
        assert_eq!(scope_of(&["-g=3"]), gen3);
        assert_eq!(scope_of(&["--gen=3"]), gen3);
        assert_eq!(scope_of(&["--gen", "3"]), gen3);
        assert_eq!(scope_of(&["-g", "3"]), gen3);
    }

    #[test]
    fn test_no_selector_is_full_run() {
        assert_eq!(scope_of(&[]), GenerationScope::All);
    }

    #[test]
    fn test_out_of_range_generation_exits_one() {
        for args in [["--gen=0"], ["--gen=10"], ["-g=abc"]] {
            let err = parse(&args).unwrap_err();
            assert!(err.use_stderr(), "{args:?} should be a usage error");
            assert_eq!(parse_exit_code(&err), 1, "{args:?}");
        }
    }

    #[test]
    fn test_unknown_flag_exits_one() {
        let err = parse(&["--generation=3"]).unwrap_err();
        assert_eq!(parse_exit_code(&err), 1);
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(parse_exit_code(&help), 0);

        let version = parse(&["--version"]).unwrap_err();
        assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
        assert_eq!(parse_exit_code(&version), 0);
    }

    #[test]
    fn test_overrides_replace_config() {
        let (scope, config) = resolve(
            parse(&["-g=9", "--output", "out/dex.json", "--base-url", "http://localhost:9000/api/", "--delay-ms", "0"])
                .unwrap(),
            SeedConfig::default(),
        );

        assert_eq!(scope, GenerationScope::Single(Generation::new(9).unwrap()));
        assert_eq!(config.output_path, PathBuf::from("out/dex.json"));
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, SeedConfig::default().request_timeout);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let base = SeedConfig {
            output_path: PathBuf::from("from/env.json"),
            ..SeedConfig::default()
        };
        let (_, config) = resolve(parse(&[]).unwrap(), base.clone());
        assert_eq!(config, base);
    }
}
