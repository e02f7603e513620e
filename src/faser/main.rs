use clap::Parser;
use device::{SensorCommand, handle_command};
use faser_manager::error::FaserResult;

mod device;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Configure and query a Faser sensor pad", long_about = None)]
struct Cli {
    /// Serial port; discovered from USB ids when omitted
    #[clap(short, long, global = true)]
    port: Option<String>,

    /// Log each transaction
    #[clap(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: SensorCommand,
}

fn main() -> FaserResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    handle_command(cli.port, cli.command)
}
