use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use chainscript_exec::{execute_program, Diagnostic, ExecutionContext};
use chainscript_lang::parse_program;
use chainscript_ledger::{read_snapshot, verify_chain};
use chainscript_server::{ChainServer, ServerConfig};
use chainscript_types::{Schema, TypeTag};

use crate::cli::*;
use crate::driver::split_cases;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run(args) => cmd_run(args),
        Command::Test(args) => cmd_test(args),
        Command::Verify(args) => cmd_verify(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    if execute_source(&source, &args.export_dir) {
        Ok(())
    } else {
        anyhow::bail!("script failed to parse");
    }
}

fn cmd_test(args: TestArgs) -> anyhow::Result<()> {
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let cases = split_cases(&script);
    if cases.is_empty() {
        println!("No cases in {}.", args.script.display());
        return Ok(());
    }

    for (number, case) in cases.iter().enumerate() {
        if let Some(header) = &case.header {
            println!("\n{}", header.dimmed());
        } else {
            println!("\n{}", format!("// case {}", number + 1).dimmed());
        }
        println!("{}", case.source);
        // each case runs on a clean slate; a bad case never stops the driver
        execute_source(&case.source, &args.export_dir);
    }
    println!(
        "\n{} {} case(s) executed.",
        "✓".green().bold(),
        cases.len()
    );
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.snapshot)
        .with_context(|| format!("reading {}", args.snapshot.display()))?;
    let blocks = read_snapshot(&bytes).context("snapshot is not a valid chain export")?;
    verify_chain(&blocks).context("chain integrity check failed")?;
    println!(
        "{} chain integrity verified ({} blocks)",
        "✓".green().bold(),
        blocks.len()
    );
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind.parse().context("invalid bind address")?,
        ledger_name: args.ledger,
        schema: parse_schema_spec(&args.schema)?,
        export_dir: args.export_dir,
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(ChainServer::new(config).serve())?;
    Ok(())
}

/// Parse and execute one program, printing every diagnostic. Returns `false`
/// on a syntax error (semantic errors are non-fatal by contract).
fn execute_source(source: &str, export_dir: &Path) -> bool {
    let (program, lex_diagnostics) = match parse_program(source) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("{} {e}", "✗".red().bold());
            return false;
        }
    };
    for diagnostic in &lex_diagnostics {
        println!("{} {diagnostic}", "warning:".yellow());
    }

    let mut ctx = ExecutionContext::with_export_dir(export_dir);
    for diagnostic in execute_program(&mut ctx, &program) {
        print_diagnostic(&diagnostic);
    }
    true
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    if diagnostic.is_error() {
        println!("{} {}", "✗".red().bold(), diagnostic.message);
    } else {
        println!("{}", diagnostic.message);
    }
}

/// Parse a `name:type,...` schema spec, e.g. `borrower:str,amount:float`.
fn parse_schema_spec(spec: &str) -> anyhow::Result<Schema> {
    if spec.trim().is_empty() {
        return Ok(Schema::empty());
    }
    let mut attributes = Vec::new();
    for part in spec.split(',') {
        let (name, keyword) = part
            .trim()
            .split_once(':')
            .with_context(|| format!("attribute '{part}' is not name:type"))?;
        let tag = TypeTag::from_keyword(keyword.trim())
            .with_context(|| format!("unknown type keyword '{}'", keyword.trim()))?;
        attributes.push((name.trim().to_string(), tag));
    }
    Schema::new(attributes).context("invalid schema")
}
