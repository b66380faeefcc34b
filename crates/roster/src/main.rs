use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use roster::commands;
use roster::display::OutputFormat;
use roster::export::ExportFormat;
use roster::source::source_for;
use roster::{CustomerQuery, RosterConfig, StatusFilter};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster - Customer Records\nSearch, filter, summarize and export the pharmacy customer roster")]
#[command(version)]
struct Cli {
  /// Customer file (JSON or YAML); the built-in sample data is used when unset
  #[arg(long, global = true, env = "ROSTER_DATA")]
  data: Option<PathBuf>,

  /// Configuration file path
  #[arg(long, global = true, env = "ROSTER_CONFIG")]
  config: Option<PathBuf>,

  /// Show debug output
  #[arg(short, long, global = true, conflicts_with = "quiet")]
  verbose: bool,

  /// Only show errors
  #[arg(short, long, global = true)]
  quiet: bool,

  /// Disable colored output
  #[arg(long, global = true)]
  no_color: bool,

  #[command(subcommand)]
  command: Commands,
}

/// The three filter inputs of the customer page
#[derive(Args)]
struct FilterArgs {
  /// Search by name, email or id (case-insensitive)
  #[arg(short, long, default_value = "")]
  search: String,
  /// Status filter: all, active, inactive or suspended
  #[arg(long)]
  status: Option<StatusFilter>,
  /// Selected tab: all, active, inactive or suspended
  #[arg(long)]
  tab: Option<StatusFilter>,
}

impl FilterArgs {
  fn into_query(self, config: &RosterConfig) -> CustomerQuery {
    CustomerQuery::new(
      self.search,
      self.status.unwrap_or_else(|| config.default_status.clone()),
      self.tab.unwrap_or_else(|| config.default_tab.clone()),
    )
  }
}

#[derive(Subcommand)]
enum Commands {
  /// List customers matching the search, status and tab
  List {
    #[command(flatten)]
    filter: FilterArgs,
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
  },
  /// Show status counts and spend figures
  Stats {
    #[command(flatten)]
    filter: FilterArgs,
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
  },
  /// Show the full profile of one customer
  Show {
    /// Customer id, e.g. CUST-001
    id: String,
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
  },
  /// Export matching customers as JSON, YAML or CSV
  Export {
    #[command(flatten)]
    filter: FilterArgs,
    /// Export format
    #[arg(long = "as", value_enum, default_value = "json")]
    format: ExportFormat,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Check the customer data against the record schema
  Validate,
}

fn init_logging(cli: &Cli) {
  let verbosity = if cli.quiet {
    bentley::Verbosity::Quiet
  } else if cli.verbose {
    bentley::Verbosity::Verbose
  } else {
    bentley::Verbosity::Normal
  };
  bentley::set_verbosity(verbosity);

  // Structured tracing output is opt-in through RUST_LOG
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(&cli);

  let config = RosterConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
  if cli.no_color || !config.color {
    colored::control::set_override(false);
  }

  let data_path = config.resolve_data_path(cli.data.as_deref());
  let source = source_for(data_path.as_deref());
  let customers =
    source.load().with_context(|| format!("Failed to load customers from {}", source.describe()))?;
  bentley::verbose!("Loaded {} customers from {}", customers.len(), source.describe());

  match cli.command {
    Commands::List { filter, format } => {
      let query = filter.into_query(&config);
      let format = format.unwrap_or(config.default_format);
      println!("{}", commands::list_customers(&customers, &query, format)?);
    }
    Commands::Stats { filter, format } => {
      let query = filter.into_query(&config);
      let format = format.unwrap_or(config.default_format);
      println!("{}", commands::customer_stats(&customers, &query, format)?);
    }
    Commands::Show { id, format } => {
      let format = format.unwrap_or(config.default_format);
      println!("{}", commands::show_customer(&customers, &id, format)?);
    }
    Commands::Export { filter, format, output } => {
      let query = filter.into_query(&config);
      if let Some(text) = commands::export_customers(&customers, &query, format, output.as_deref())? {
        println!("{}", text.trim_end());
      }
    }
    Commands::Validate => {
      bentley::success!("{}", commands::validation_summary(&customers, &source.describe()));
    }
  }

  Ok(())
}
