mod dns;
mod error;
mod host;
mod model;
mod subdomains;
mod utils;

pub use error::{Error, Result};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dns::{DnsResolver, ResolverConfig, SharedResolver};
use model::{render_host_info, render_subdomains, OutputFormat};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use subdomains::{BruteForceConfig, Wordlist, RESOLVE_DNS_CONCURRENCY};
use tracing::{error, info};
use utils::{ensure_dir, log::init_tracing_subscriber};

// timeouts
pub const RESOLVE_DNS_TIMEOUT_MS: u64 = 4000;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about("Gather DNS information about IP addresses and hostnames")
        .subcommand(
            Command::new("host")
                .about("Get information about a particular host (IP address or hostname)")
                .arg(target_arg("HOST", "The IP address or hostname to look up"))
                .arg(resolver_arg())
                .arg(timeout_arg())
                .arg(output_arg())
                .arg(logs_arg()),
        )
        .subcommand(
            Command::new("subdomains")
                .about("Lookup possible subdomains for a given host")
                .arg(target_arg("DOMAIN", "The domain to brute force"))
                .arg(
                    Arg::new("wordlist")
                        .short('w')
                        .long("wordlist")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Custom wordlist to use for brute-forcing subdomains"),
                )
                .arg(
                    Arg::new("concurrency")
                        .short('c')
                        .long("concurrency")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("Maximum number of DNS lookups in flight"),
                )
                .arg(
                    Arg::new("deadline")
                        .short('d')
                        .long("deadline")
                        .value_name("SECS")
                        .value_parser(value_parser!(u64))
                        .help("Stop the brute force after SECS seconds and keep what resolved"),
                )
                .arg(resolver_arg())
                .arg(timeout_arg())
                .arg(output_arg())
                .arg(logs_arg()),
        )
        .arg_required_else_help(true)
        .get_matches();

    match cli.subcommand() {
        Some(("host", args)) => run_host(args).await,
        Some(("subdomains", args)) => run_subdomains(args).await,

        // fallback if a cmd is not handled (should not possible)
        _ => {
            error!("{:12} - Command not handled, exit program", "CLI ERROR");
            Err(Error::CliUsage("Command not handled".into()))
        }
    }
}

// region:        --- Commands

async fn run_host(args: &ArgMatches) -> Result<()> {
    let target = required_target(args)?;
    let format = setup(args, target)?;
    let resolver = new_resolver(args)?;

    if format == OutputFormat::Text {
        println!("performing host lookup for {}...", target);
    }
    let host_info = host::gather(resolver.as_ref(), target).await?;

    println!("{}", render_host_info(target, &host_info, format)?);
    Ok(())
}

async fn run_subdomains(args: &ArgMatches) -> Result<()> {
    let target = required_target(args)?;
    let format = setup(args, target)?;
    let resolver = new_resolver(args)?;

    let wordlist = match args.get_one::<PathBuf>("wordlist") {
        Some(path) => Wordlist::from_file(path)?,
        None => Wordlist::default(),
    };
    let config = BruteForceConfig {
        concurrency: args
            .get_one::<usize>("concurrency")
            .copied()
            .unwrap_or(RESOLVE_DNS_CONCURRENCY),
        deadline: args
            .get_one::<u64>("deadline")
            .map(|secs| Duration::from_secs(*secs)),
    };

    if format == OutputFormat::Text {
        println!("performing subdomain lookup for {}...", target);
    }
    let report = subdomains::brute_force(resolver.as_ref(), target, &wordlist, &config).await;

    println!("{}", render_subdomains(&report, format)?);
    Ok(())
}

// endregion:     --- Commands

// region:        --- Setup

/// Initializes logging and returns the requested output format.
fn setup(args: &ArgMatches, target: &str) -> Result<OutputFormat> {
    let save_logs = args.get_flag("logs");
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let filename = format!("{}", timestamp);

    let output_dir = format!("output/recon/{}", target);
    let log_dir = save_logs.then(|| Path::new(&output_dir));
    if let Some(dir) = log_dir {
        ensure_dir(dir)?;
    }
    init_tracing_subscriber(log_dir, &filename)?;
    info!("Run {} on {}", filename, target);

    match args.get_one::<String>("output") {
        Some(format) => OutputFormat::from_arg(format),
        None => Ok(OutputFormat::Text),
    }
}

fn new_resolver(args: &ArgMatches) -> Result<SharedResolver> {
    let override_address = args.get_one::<String>("resolver").map(String::as_str);
    let timeout_ms = args
        .get_one::<u64>("timeout")
        .copied()
        .unwrap_or(RESOLVE_DNS_TIMEOUT_MS);

    let config = ResolverConfig::new(override_address, Duration::from_millis(timeout_ms))?;
    let resolver: SharedResolver = Arc::new(DnsResolver::new(&config)?);
    Ok(resolver)
}

fn required_target(args: &ArgMatches) -> Result<&str> {
    args.get_one::<String>("target")
        .map(String::as_str)
        .ok_or_else(|| Error::CliUsage("missing host value".into()))
}

// endregion:     --- Setup

// region:        --- Arguments

fn target_arg(value_name: &'static str, help: &'static str) -> Arg {
    Arg::new("target")
        .help(help)
        .value_name(value_name)
        .required(true)
        .index(1)
}

fn resolver_arg() -> Arg {
    Arg::new("resolver")
        .short('r')
        .long("resolver")
        .value_name("IP")
        .help("Custom resolver IP address to use for DNS lookups (queried on udp/53)")
}

fn timeout_arg() -> Arg {
    Arg::new("timeout")
        .short('t')
        .long("timeout")
        .value_name("MS")
        .value_parser(value_parser!(u64))
        .help("Timeout of a single DNS lookup in milliseconds")
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .help("Output format")
        .value_name("OUTPUT")
        .value_parser(["text", "json"])
        .default_value("text")
}

fn logs_arg() -> Arg {
    Arg::new("logs")
        .short('s')
        .long("logs")
        .action(ArgAction::SetTrue)
        .help("Save logs into a .log file")
}

// endregion:     --- Arguments
