//! Achilles - Vulnerable-by-Design Web Lab CLI

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;

use achilles::apps;
use achilles::config;
use achilles::error::AchillesError;
use achilles::fetch::{Fetcher, TimeoutPolicy};
use achilles::models::{LabConfig, ProbeReport, Variant};
use achilles::probe;

/// Achilles - Vulnerable-by-Design Web Lab
#[derive(Parser)]
#[command(name = "achilles", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one of the paired demo web apps
    Serve {
        /// Which app to run (vulnerable or hardened)
        #[arg(long)]
        variant: String,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Fetch a URL and print the response body
    Fetch {
        /// URL to fetch
        #[arg(short, long)]
        url: String,

        /// Drop the client-side timeout (an unresponsive host hangs the call)
        #[arg(long)]
        insecure: bool,

        /// Client-side timeout in seconds (ignored with --insecure)
        #[arg(long)]
        timeout: Option<u64>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Check whether a TCP listener is reachable
    Probe {
        /// Host or IP to probe (prompts interactively when omitted)
        #[arg(long)]
        host: Option<String>,

        /// Port to probe
        #[arg(short, long)]
        port: Option<u16>,

        /// Connect deadline in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "achilles=debug"
    } else {
        "achilles=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

fn print_banner() {
    let banner = r#"
    ╔═══════════════════════════════════════╗
    ║  🛡  ACHILLES v0.1.0                  ║
    ║  Vulnerable-by-Design Web Lab         ║
    ║  "Strong everywhere but the heel"     ║
    ╚═══════════════════════════════════════╝
    "#;
    println!("{}", banner.cyan());
}

fn load_lab_config(path: Option<&PathBuf>) -> Result<LabConfig, AchillesError> {
    if let Some(path) = path {
        return config::load_config(path);
    }
    let default_path = Path::new("config/default.toml");
    if default_path.exists() {
        config::load_config(default_path)
    } else {
        Ok(LabConfig::default())
    }
}

fn prompt(message: &str) -> std::io::Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_probe_summary(report: &ProbeReport) {
    let reachable = if report.reachable { "yes" } else { "no" };

    let mut builder = Builder::default();
    builder.push_record(["Host".to_string(), report.host.clone()]);
    builder.push_record(["Port".to_string(), report.port.to_string()]);
    builder.push_record(["Reachable".to_string(), reachable.to_string()]);
    builder.push_record(["Elapsed".to_string(), format!("{} ms", report.elapsed_ms)]);

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{table}");
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            variant,
            port,
            host,
            config: config_path,
            verbose,
        } => {
            init_tracing(verbose);
            print_banner();

            let variant: Variant = variant.parse().unwrap_or_else(|_| {
                eprintln!("Error: invalid --variant '{variant}'. Use: vulnerable, hardened");
                std::process::exit(1);
            });

            let mut lab_config = load_lab_config(config_path.as_ref())?;
            config::merge_cli_args(&mut lab_config, host, port);

            let variant_label = match variant {
                Variant::Vulnerable => variant.to_string().red().bold(),
                Variant::Hardened => variant.to_string().green().bold(),
            };
            println!("  {} {}", "Variant:".bold(), variant_label);
            println!(
                "  {} {}\n",
                "Listening:".bold(),
                format!("http://{}:{}", lab_config.bind_host, lab_config.port).cyan()
            );
            if variant == Variant::Vulnerable {
                println!(
                    "  {}\n",
                    "This build intentionally ships exploitable behavior. Bind only to loopback."
                        .yellow()
                );
            }

            let ip: IpAddr = lab_config.bind_host.parse().map_err(|_| {
                AchillesError::ConfigError(format!(
                    "bind host '{}' is not an IP address",
                    lab_config.bind_host
                ))
            })?;
            let addr = SocketAddr::from((ip, lab_config.port));

            apps::serve(apps::app_for(variant), addr).await?;
        }

        Commands::Fetch {
            url,
            insecure,
            timeout,
            config: config_path,
            verbose,
        } => {
            init_tracing(verbose);
            print_banner();

            let lab_config = load_lab_config(config_path.as_ref())?;

            let policy = if insecure {
                println!(
                    "  {}\n",
                    "No client-side timeout; an unresponsive host will hang this call indefinitely."
                        .yellow()
                );
                TimeoutPolicy::Unbounded
            } else {
                TimeoutPolicy::Bounded(Duration::from_secs(
                    timeout.unwrap_or(lab_config.fetch_timeout_secs),
                ))
            };

            let fetcher = Fetcher::new(policy, &lab_config.user_agent)?;
            let body = fetcher.fetch_data(&url).await?;
            println!("{body}");
        }

        Commands::Probe {
            host,
            port,
            timeout,
            json,
            config: config_path,
            verbose,
        } => {
            init_tracing(verbose);
            if !json {
                print_banner();
            }

            let lab_config = load_lab_config(config_path.as_ref())?;

            let (host, port) = match host {
                Some(h) => (h, port.unwrap_or(lab_config.probe_default_port)),
                None => {
                    let h = prompt("Enter host or IP (e.g. example.com or 192.0.2.1): ")?;
                    let port_input = prompt(&format!(
                        "Enter port (press Enter for {}): ",
                        lab_config.probe_default_port
                    ))?;
                    let p = if port_input.is_empty() {
                        lab_config.probe_default_port
                    } else {
                        port_input.parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid port '{port_input}'");
                            std::process::exit(1);
                        })
                    };
                    (h, p)
                }
            };

            let deadline = Duration::from_secs(timeout.unwrap_or(lab_config.probe_timeout_secs));
            let report = probe::probe(&host, port, deadline).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_probe_summary(&report);
                if report.reachable {
                    println!(
                        "\n  {}",
                        format!("Connection to {host}:{port} succeeded.").green()
                    );
                } else {
                    println!(
                        "\n  {}",
                        format!("Could not connect to {host}:{port}.").red()
                    );
                }
            }
        }
    }

    Ok(())
}
