use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chainscript",
    about = "chainscript — a DSL for append-only, hash-chained record ledgers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse and execute a script against a fresh ledger registry
    Run(RunArgs),
    /// Run a multi-case script: cases split on comment-line boundaries,
    /// each executed against its own fresh registry
    Test(TestArgs),
    /// Verify the chain integrity of an exported snapshot
    Verify(VerifyArgs),
    /// Start the ledger web front end
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,
}

#[derive(Args)]
pub struct TestArgs {
    pub script: PathBuf,
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub snapshot: PathBuf,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:9973")]
    pub bind: String,
    /// Name of the single ledger the server owns
    #[arg(long, default_value = "Loans")]
    pub ledger: String,
    /// Ledger schema as `name:type,...` (types: str int long float List Tuple Dict)
    #[arg(long, default_value = "borrower:str,lender:str,amount:float")]
    pub schema: String,
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,
}
