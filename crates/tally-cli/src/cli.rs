use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tally",
    about = "A pairwise debt ledger with transitive netting",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Snapshot file backing the ledger
    #[arg(long, global = true, default_value = "saved.debt")]
    pub snapshot: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record that one party owes another an additional amount
    Add(AddArgs),
    /// Show the debts and credits of a single party
    Show(ShowArgs),
    /// List every outstanding debt
    All(AllArgs),
    /// Verify the ledger invariants
    Check(CheckArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Party that owes
    pub debtor: String,
    /// Party that is owed
    pub creditor: String,
    /// Amount owed, in whole units
    pub amount: u64,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Party to look up
    pub party: String,
}

#[derive(Args)]
pub struct AllArgs {}

#[derive(Args)]
pub struct CheckArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["tally", "add", "alice", "bob", "15"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.debtor, "alice");
            assert_eq!(args.creditor, "bob");
            assert_eq!(args.amount, 15);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn test_parse_add_rejects_non_numeric_amount() {
        assert!(Cli::try_parse_from(["tally", "add", "alice", "bob", "lots"]).is_err());
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["tally", "show", "alice"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.party, "alice");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn test_parse_all() {
        let cli = Cli::try_parse_from(["tally", "all"]).unwrap();
        assert!(matches!(cli.command, Command::All(_)));
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["tally", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn test_parse_default_snapshot() {
        let cli = Cli::try_parse_from(["tally", "all"]).unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("saved.debt"));
    }

    #[test]
    fn test_parse_snapshot_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["tally", "all", "--snapshot", "/tmp/house.debt"]).unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("/tmp/house.debt"));
    }

    #[test]
    fn test_parse_format_json() {
        let cli = Cli::try_parse_from(["tally", "all", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn test_parse_verbose_short_flag() {
        let cli = Cli::try_parse_from(["tally", "-v", "show", "alice"]).unwrap();
        assert!(cli.verbose);
    }
}
