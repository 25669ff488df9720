use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{FilterInput, ProductionInput, RecordId, SortColumn};

#[derive(Parser, Debug)]
#[command(name = "prodtrack")]
#[command(about = "Collaborator production ledger: register, filter, report and export sales")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the SQLite store path (`:memory:` for a throwaway store).
    #[arg(long, global = true)]
    pub database: Option<String>,
    /// Override the directory backups are written to.
    #[arg(long, global = true)]
    pub backup_dir: Option<String>,
    /// Override the log level (e.g. debug).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new production record.
    Register(RecordArgs),
    /// Replace a record. Fields not given keep their current value.
    Edit {
        id: RecordId,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Print one record.
    Show { id: RecordId },
    /// List the records matching the filters.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Sort by a column; repeating the same column reverses the order.
        #[arg(long, value_enum)]
        sort: Vec<SortArg>,
    },
    /// Total the amounts of the matching records per collaborator.
    Report(FilterArgs),
    /// Write the matching records to a CSV file.
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Delete a record.
    Delete {
        id: RecordId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Branch codes.
    Branches(Branches),
    /// Copy the store file into the backup directory.
    Backup,
}

#[derive(Args, Debug)]
pub struct Branches {
    #[command(subcommand)]
    pub command: BranchesCommand,
}

#[derive(Subcommand, Debug)]
pub enum BranchesCommand {
    List,
    Add { name: String },
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordArgs {
    #[arg(long)]
    pub branch: Option<String>,
    #[arg(long)]
    pub collaborator: Option<String>,
    /// `DD-MM-YYYY`.
    #[arg(long)]
    pub date: Option<String>,
    /// CPF or CNPJ, punctuation allowed.
    #[arg(long)]
    pub tax_id: Option<String>,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub product: Option<String>,
    /// `IN PROGRESS`, `COMPLETED` or `CANCELLED`.
    #[arg(long)]
    pub status: Option<String>,
    /// e.g. `1.234,56` or `R$ 100`.
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl RecordArgs {
    /// Overwrites the fields of `input` that were given.
    pub fn apply_to(self, input: &mut ProductionInput) {
        let fields = [
            (self.branch, &mut input.branch),
            (self.collaborator, &mut input.collaborator),
            (self.date, &mut input.date),
            (self.tax_id, &mut input.tax_id),
            (self.client, &mut input.client),
            (self.product, &mut input.product),
            (self.status, &mut input.status),
            (self.amount, &mut input.amount),
            (self.notes, &mut input.notes),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    pub fn into_input(self) -> ProductionInput {
        let mut input = ProductionInput::default();
        self.apply_to(&mut input);
        input
    }
}

#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterArgs {
    /// Exact branch code.
    #[arg(long)]
    pub branch: Option<String>,
    /// Substring of the collaborator name.
    #[arg(long)]
    pub collaborator: Option<String>,
    /// Substring of the client name.
    #[arg(long)]
    pub client: Option<String>,
    /// Substring of the product.
    #[arg(long)]
    pub product: Option<String>,
    /// `YYYY`, `MM-YYYY`/`YYYY-MM` or `DD-MM-YYYY`/`YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<String>,
    /// Range start, `DD-MM-YYYY`. Needs `--to`.
    #[arg(long)]
    pub from: Option<String>,
    /// Range end, `DD-MM-YYYY`. Needs `--from`.
    #[arg(long)]
    pub to: Option<String>,
}

impl From<FilterArgs> for FilterInput {
    fn from(args: FilterArgs) -> Self {
        Self {
            branch: args.branch,
            collaborator: args.collaborator,
            client: args.client,
            product: args.product,
            date: args.date,
            from: args.from,
            to: args.to,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Id,
    Branch,
    Collaborator,
    Date,
    TaxId,
    Client,
    Product,
    Status,
    Amount,
    Notes,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Id => Self::Id,
            SortArg::Branch => Self::Branch,
            SortArg::Collaborator => Self::Collaborator,
            SortArg::Date => Self::Date,
            SortArg::TaxId => Self::TaxId,
            SortArg::Client => Self::Client,
            SortArg::Product => Self::Product,
            SortArg::Status => Self::Status,
            SortArg::Amount => Self::Amount,
            SortArg::Notes => Self::Notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_keeps_fields_not_given() {
        let cli = Cli::parse_from(["prodtrack", "edit", "7", "--amount", "200,00"]);
        let Command::Edit { id, record } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 7);

        let mut input = ProductionInput {
            branch: "PA01".to_string(),
            amount: "100.00".to_string(),
            ..Default::default()
        };
        record.apply_to(&mut input);
        assert_eq!(input.branch, "PA01");
        assert_eq!(input.amount, "200,00");
    }

    #[test]
    fn filter_flags_map_to_filter_input() {
        let cli = Cli::parse_from([
            "prodtrack",
            "report",
            "--branch",
            "PA01",
            "--from",
            "01-01-2024",
            "--to",
            "31-12-2024",
        ]);
        let Command::Report(filter) = cli.command else {
            panic!("expected report");
        };
        let input = FilterInput::from(filter);
        assert_eq!(input.branch.as_deref(), Some("PA01"));
        assert_eq!(input.from.as_deref(), Some("01-01-2024"));
        assert_eq!(input.to.as_deref(), Some("31-12-2024"));
        assert_eq!(input.collaborator, None);
    }

    #[test]
    fn sort_flag_repeats() {
        let cli = Cli::parse_from(["prodtrack", "list", "--sort", "amount", "--sort", "amount"]);
        let Command::List { sort, .. } = cli.command else {
            panic!("expected list");
        };
        assert_eq!(sort, vec![SortArg::Amount, SortArg::Amount]);
        assert_eq!(SortColumn::from(SortArg::TaxId), SortColumn::TaxId);
    }
}
