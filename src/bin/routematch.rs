use clap::Parser;
use routematch::cli::{run_cli, Cli};
use routematch::otel;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    otel::init_logging(&cli.log_level)?;
    run_cli(cli)
}
