use crate::evaluate::{run_evaluate, run_lenders, EvaluateArgs, LendersArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Match",
    about = "Match business-loan leads against lender policies",
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
    /// Evaluate a lead stored as JSON and print the verdict for every lender
    Evaluate(EvaluateArgs),
    /// List the lender policies in the catalog
    Lenders(LendersArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Lenders(args) => run_lenders(args),
    }
}
