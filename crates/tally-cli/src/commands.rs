use colored::Colorize;

use tally_service::{FileDebtService, ServiceConfig};
use tally_types::PartyId;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        command,
        snapshot,
        verbose: _,
        format,
    } = cli;

    let service = FileDebtService::open(&ServiceConfig::at(snapshot));

    match command {
        Command::Add(args) => cmd_add(&service, args, format),
        Command::Show(args) => cmd_show(&service, args, format),
        Command::All(_) => cmd_all(&service, format),
        Command::Check(_) => cmd_check(&service),
    }
}

fn cmd_add(
    service: &FileDebtService,
    args: AddArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let debtor = PartyId::new(args.debtor)?;
    let creditor = PartyId::new(args.creditor)?;
    let confirmation = service.record_debt(debtor, creditor, args.amount)?;

    match format {
        OutputFormat::Text => println!("{} {}", "✓".green().bold(), confirmation),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&confirmation)?),
    }
    Ok(())
}

fn cmd_show(
    service: &FileDebtService,
    args: ShowArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let party = PartyId::new(args.party)?;

    match format {
        OutputFormat::Text => println!("{}", service.statement_for(&party)?),
        OutputFormat::Json => {
            let involving: Vec<_> = service
                .records()?
                .into_iter()
                .filter(|record| record.involves(&party))
                .collect();
            println!("{}", serde_json::to_string_pretty(&involving)?);
        }
    }
    Ok(())
}

fn cmd_all(service: &FileDebtService, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", service.statement_all()?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&service.records()?)?),
    }
    Ok(())
}

fn cmd_check(service: &FileDebtService) -> anyhow::Result<()> {
    let report = service.audit()?;

    if report.is_clean() {
        println!(
            "{} {} records, no violations",
            "✓".green().bold(),
            report.record_count
        );
        return Ok(());
    }

    println!(
        "{} {} violations across {} records:",
        "✗".red().bold(),
        report.violations.len(),
        report.record_count
    );
    for violation in &report.violations {
        println!(
            "  {} {}",
            format!("{:?}", violation.kind).yellow(),
            violation.description
        );
    }
    anyhow::bail!("ledger invariants do not hold")
}
