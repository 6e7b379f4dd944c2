use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use loan_desk::config::StoreBackend;
use loan_desk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Desk",
    about = "Submit and track loan applications over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured application store
    #[arg(long, value_enum)]
    pub(crate) store: Option<StoreArg>,
    /// Path of the JSON document used by the file store
    #[arg(long)]
    pub(crate) store_path: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreArg {
    Memory,
    File,
}

impl From<StoreArg> for StoreBackend {
    fn from(value: StoreArg) -> Self {
        match value {
            StoreArg::Memory => StoreBackend::Memory,
            StoreArg::File => StoreBackend::File,
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
    }
}
