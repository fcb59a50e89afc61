mod errors;
mod handlers;
mod state;
mod ui;

use clap::{ArgAction, Parser};
use colored::Colorize;
use facetsearch_core::ValueOrder;
use std::io;
use std::path::PathBuf;
use std::process;

use crate::errors::map_load_error;
use crate::handlers::run_interactive;
use crate::state::{AppState, ViewSettings};
use crate::ui::{render_view, Snapshot};

/// Faceted search over a JSON dataset
///
/// Examples:
///   # Show every item with per-value counts
///   facetsearch products.json
///
///   # Start with filters (OR within a facet, AND across facets)
///   facetsearch products.json --facet color=red --facet color=blue --facet size=S
///
///   # Order values by count and group the results
///   facetsearch products.json --value-order count --group-by brand
///
///   # Toggle values interactively
///   facetsearch products.json --interactive
#[derive(Parser, Debug)]
#[command(name = "facetsearch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Multiple --facet values for the SAME facet name are combined with OR\n  \
    - Different facet names are combined with AND\n  \
    - A facet with no selected value does not filter\n\n\
Counts:\n  \
    - A facet with no selection counts every value over the matching items\n  \
    - A facet with a selection only counts its selected values\n\n\
Dataset format:\n  \
    {\"facets\": {\"color\": \"Color\"}, \"items\": [{\"color\": \"red\"}], \"pagination_count\": 20}")]
struct Cli {
    /// Path to the dataset JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Select a facet value (format: facet_name=value, can be specified multiple times)
    #[arg(short, long = "facet", value_name = "NAME=VALUE")]
    facets: Vec<String>,

    /// Items per page, overriding the dataset's pagination_count
    #[arg(short, long = "page-size", value_name = "N")]
    page_size: Option<usize>,

    /// Sort results by "name" or by a facet
    #[arg(short, long = "sort", value_name = "FIELD")]
    sort_by: Option<String>,

    /// Group results by a facet name
    #[arg(short = 'G', long = "group-by", value_name = "FACET")]
    group_by: Option<String>,

    /// Order of values inside a facet group: first-seen, name or count
    #[arg(long = "value-order", value_name = "ORDER", default_value = "first-seen")]
    value_order: ValueOrder,

    /// Read toggle commands from stdin after the first render
    #[arg(short, long)]
    interactive: bool,

    /// Print visible ids, counts and active filters as JSON instead
    #[arg(long, conflicts_with = "interactive")]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(&cli) {
        let (title, message, details) = map_load_error(&err, &cli.file);
        eprintln!("{} {}", format!("{}:", title).red().bold(), message);
        if !details.is_empty() {
            eprintln!("\n{}", details);
        }
        process::exit(1);
    }
}

/// RUST_LOG wins over -v
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let view = ViewSettings {
        sort_by: cli.sort_by.clone(),
        group_by: cli.group_by.clone(),
        value_order: cli.value_order,
    };

    let mut state = AppState::load_from_file(&cli.file, view, cli.page_size)?;
    state.apply_initial_filters(&cli.facets);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&Snapshot::from_state(&state))?);
        return Ok(());
    }

    print!("{}", render_view(&state));

    if cli.interactive {
        let stdin = io::stdin();
        run_interactive(&mut state, stdin.lock(), io::stdout())?;
    }

    Ok(())
}
