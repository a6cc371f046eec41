use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::manifest::RouteManifest;
use crate::router::{MatchOutcome, Router};
use crate::runtime_config::RouterConfig;

/// Command-line interface for routematch
///
/// Inspects route manifests and resolves requests against them.
#[derive(Parser, Debug)]
#[command(name = "routematch")]
#[command(about = "Inspect and query HTTP route tables", long_about = None)]
pub struct Cli {
    /// Log level for diagnostics written to stderr
    #[arg(long, global = true, env = "ROUTEMATCH_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for `routes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every route in registration order
    Routes {
        /// Route manifest (YAML, TOML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Resolve one request against the manifest
    Match {
        /// Route manifest (YAML, TOML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// HTTP method (case-insensitive)
        method: String,

        /// Request path, e.g. /users/42
        path: String,
    },
    /// Report conflicting registrations
    Check {
        /// Route manifest (YAML, TOML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Exit with an error if any conflict is found
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
}

/// Run a parsed command, writing results to stdout
pub fn run_cli(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli.command, RouterConfig::from_env(), &mut out)
}

/// Run a command against an explicit config and writer
pub fn run_with_output(command: Commands, config: RouterConfig, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Routes { manifest, format } => {
            let router = load_router(&manifest, config)?;
            match format {
                OutputFormat::Table => {
                    for route in router.list_routes() {
                        writeln!(
                            out,
                            "{:<8} {:<40} {} ({})",
                            route.method.as_str(),
                            route.path,
                            route.handler,
                            route.name
                        )?;
                    }
                }
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&router.list_routes())
                        .context("Failed to serialize route list")?;
                    writeln!(out, "{json}")?;
                }
            }
        }
        Commands::Match {
            manifest,
            method,
            path,
        } => {
            let router = load_router(&manifest, config)?;
            match router.match_route(&method, &path) {
                MatchOutcome::Matched(m) => {
                    writeln!(
                        out,
                        "200 {} {} -> {} ({})",
                        m.route.method, m.route.pattern, m.route.handler, m.route.name
                    )?;
                    for (name, value) in &m.path_params {
                        writeln!(out, "  {name} = {value}")?;
                    }
                }
                MatchOutcome::MethodNotAllowed { allowed } => {
                    writeln!(out, "405 Method Not Allowed")?;
                    writeln!(out, "Allow: {}", allowed.allow_header())?;
                }
                MatchOutcome::NotFound => {
                    writeln!(out, "404 Not Found")?;
                }
            }
        }
        Commands::Check { manifest, strict } => {
            let router = load_router(&manifest, config)?;
            let warnings = router.warnings();
            for warning in warnings {
                writeln!(out, "warning: {warning}")?;
            }
            writeln!(
                out,
                "{} route(s), {} conflict(s)",
                router.len(),
                warnings.len()
            )?;
            if (strict || config.strict_conflicts) && !warnings.is_empty() {
                bail!("{} route conflict(s) found", warnings.len());
            }
        }
    }
    Ok(())
}

fn load_router(path: &Path, config: RouterConfig) -> Result<Router> {
    let router = RouteManifest::load(path)?.build_router(config)?;
    router.log_summary();
    Ok(router)
}
