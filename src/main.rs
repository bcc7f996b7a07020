//! scholia CLI: scholarly knowledge-graph content backend.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use scholia::bundle::{fetch_bundle, BundleConfiguration};
use scholia::config::ScholiaConfig;
use scholia::store::durable::DurableGraph;
use scholia::store::{GraphStore, NewResource};
use scholia::thing::{ContributorId, ThingId};
use scholia::vocab::seed_well_known;

#[derive(Parser)]
#[command(name = "scholia", version, about = "Scholarly knowledge-graph backend")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = "scholia.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a data directory with the well-known vocabulary.
    Init,

    /// Show store statistics.
    Info,

    /// Create a resource.
    Resource {
        /// Resource label.
        label: String,

        /// Classes to attach (repeatable).
        #[arg(long)]
        class: Vec<String>,
    },

    /// Fetch the bounded subgraph reachable from a Thing.
    Bundle {
        /// Root Thing ID.
        id: String,

        /// Maximum traversal depth.
        #[arg(long, default_value = "3")]
        depth: usize,
    },

    /// Export all things and statements as JSON.
    Export,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ScholiaConfig::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let durable = DurableGraph::open(&config.data_dir)?;
            let store = durable.restore()?;
            seed_well_known(&store)?;
            durable.persist(&store)?;
            println!("Initialized scholia at {}", config.data_dir.display());
            println!(
                "  things: {}, statements: {}",
                store.thing_count(),
                store.statement_count()
            );
        }

        Commands::Info => {
            let store = open_store(&config)?;
            println!("scholia store at {}", config.data_dir.display());
            println!("  things:     {}", store.thing_count());
            println!("  statements: {}", store.statement_count());
        }

        Commands::Resource { label, class } => {
            let durable = DurableGraph::open(&config.data_dir)?;
            let store = durable.restore()?;
            let id = store.create_resource(
                NewResource::labelled(label, ContributorId::unknown())
                    .with_classes(class.iter().map(|c| ThingId::from(c.as_str()))),
            )?;
            durable.persist(&store)?;
            println!("Created resource {id}");
        }

        Commands::Bundle { id, depth } => {
            let store = open_store(&config)?;
            let root = ThingId::from(id.as_str());
            let bundle = fetch_bundle(&store, &root, &BundleConfiguration::to_depth(depth));
            if bundle.is_empty() {
                println!("No statements reachable from {root}");
            } else {
                println!("Bundle of {root} ({} statements):", bundle.len());
                for statement in &bundle.statements {
                    println!(
                        "  {} : {} -> {} -> {}",
                        statement.id, statement.subject, statement.predicate, statement.object
                    );
                }
            }
        }

        Commands::Export => {
            let store = open_store(&config)?;
            let export = serde_json::json!({
                "things": store.all_things(),
                "statements": store.all_statements(),
            });
            let json = serde_json::to_string_pretty(&export).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}

fn open_store(config: &ScholiaConfig) -> Result<GraphStore> {
    let durable = DurableGraph::open(&config.data_dir)?;
    Ok(durable.restore()?)
}
