//! oxide-dameng CLI
//!
//! Offline helper for the Dameng dialect: inspect connection strings,
//! native types and the DDL the dialect generates.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_dameng::DamengDialect;
use oxide_schema::{Column, DbType, Dialect, Index, IndexKind, SqlType, Table, Uri};

/// Dameng dialect tooling.
#[derive(Parser)]
#[command(name = "oxide-dameng")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data source name, e.g. `dm://user:password@host:5236?schema=APP`.
    #[arg(short, long, env = "DATABASE_URL")]
    dsn: Option<String>,

    /// Schema used when no data source name is given.
    #[arg(short, long, default_value = "SYSDBA")]
    schema: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the data source name and print it as JSON.
    ParseDsn,

    /// Print the native type for an abstract type name.
    SqlType {
        /// Abstract type name, e.g. VARCHAR.
        name: String,

        /// First length parameter.
        #[arg(short, long, default_value_t = 0)]
        length: usize,

        /// Second length parameter.
        #[arg(long, default_value_t = 0)]
        length2: usize,
    },

    /// Check words against the reserved keyword list.
    Reserved {
        /// Words to check.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Print CREATE TABLE and CREATE INDEX statements for a table JSON file.
    CreateTable {
        /// Path to the table description.
        file: PathBuf,

        /// Create the table under another name.
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the DROP INDEX statement for an index.
    DropIndex {
        /// Table the index belongs to.
        #[arg(short, long)]
        table: String,

        /// Index name.
        #[arg(short, long)]
        index: String,

        /// The index is unique.
        #[arg(long)]
        unique: bool,

        /// The name follows the IDX_/UQE_ convention.
        #[arg(long)]
        regular: bool,
    },

    /// Print the table existence query and its arguments.
    CheckTable {
        /// Table name.
        table: String,
    },
}

impl Cli {
    fn dialect(&self) -> anyhow::Result<DamengDialect> {
        match &self.dsn {
            Some(dsn) => DamengDialect::from_dsn(dsn).context("invalid data source name"),
            None => Ok(DamengDialect::new(Uri::for_schema(
                DbType::Dameng,
                self.schema.clone(),
            ))),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = cli.dialect()?;
    debug!(schema = dialect.schema(), "Using dialect");

    match cli.command {
        Commands::ParseDsn => {
            if cli.dsn.is_none() {
                anyhow::bail!("--dsn or DATABASE_URL is required");
            }
            println!("{}", serde_json::to_string_pretty(dialect.uri())?);
        }

        Commands::SqlType {
            name,
            length,
            length2,
        } => {
            let col = Column::new("c", SqlType::new(name.to_uppercase())).length(length, length2);
            println!("{}", dialect.sql_type(&col));
        }

        Commands::Reserved { words } => {
            for word in words {
                let state = if dialect.is_reserved(&word) {
                    "reserved"
                } else {
                    "not reserved"
                };
                println!("{word}: {state}");
            }
        }

        Commands::CreateTable { file, name } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let mut table: Table = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", file.display()))?;
            table.sync_primary_keys();

            let table_name = name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(table.name.as_str());
            let sql = dialect.create_table_sql(&table, Some(table_name));
            if sql.is_empty() {
                anyhow::bail!("could not build CREATE TABLE for {table_name}");
            }
            println!("{sql};");
            for index in table.indexes.values() {
                println!("{};", dialect.create_index_sql(table_name, index));
            }
        }

        Commands::DropIndex {
            table,
            index,
            unique,
            regular,
        } => {
            let kind = if unique {
                IndexKind::Unique
            } else {
                IndexKind::Index
            };
            let mut index = Index::new(index, kind);
            index.is_regular = regular;
            println!("{};", dialect.drop_index_sql(&table, &index));
        }

        Commands::CheckTable { table } => {
            let (sql, args) = dialect.table_check_sql(&table);
            let args: Vec<String> = args.iter().map(|a| a.to_sql_inline()).collect();
            println!("{sql}");
            println!("-- args: {}", args.join(", "));
        }
    }

    Ok(())
}
