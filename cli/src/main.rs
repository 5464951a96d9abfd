//! famgraph CLI: lay out a family snapshot and print the result

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use famgraph::layout::FamilyLayout;
use famgraph::{FamilySnapshot, LayoutConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "famgraph", version, about = "Family tree layout")]
struct Cli {
    /// Layout config file (YAML)
    #[arg(long, global = true, env = "FAMGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a family snapshot (JSON)
    Layout {
        /// Snapshot file
        snapshot: PathBuf,

        /// Horizontal spacing between persons
        #[arg(long, env = "FAMGRAPH_HORIZONTAL_SPACING")]
        horizontal: Option<f64>,

        /// Vertical spacing between generations
        #[arg(long, env = "FAMGRAPH_VERTICAL_SPACING")]
        vertical: Option<f64>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Layout {
            snapshot,
            horizontal,
            vertical,
        } => run_layout(&cli, snapshot, *horizontal, *vertical),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_layout(
    cli: &Cli,
    snapshot_path: &Path,
    horizontal: Option<f64>,
    vertical: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::from_path(path)?,
        None => LayoutConfig::default(),
    }
    .with_spacing(horizontal, vertical)?;

    let snapshot = FamilySnapshot::from_path(snapshot_path)?;
    let tree = snapshot.layout(&config);

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        }
        OutputFormat::Table => print_tables(&snapshot, &tree),
    }

    Ok(())
}

fn print_tables(snapshot: &FamilySnapshot, tree: &FamilyLayout) {
    if tree.is_empty() {
        println!("(no persons)");
        return;
    }

    let mut nodes = Table::new();
    nodes.set_content_arrangement(ContentArrangement::Dynamic);
    nodes.set_header(vec!["Person", "Name", "Lifespan", "Generation", "X", "Y"]);

    let mut rows: Vec<_> = tree.nodes.iter().collect();
    rows.sort_by(|a, b| {
        a.generation
            .cmp(&b.generation)
            .then(a.position.x.total_cmp(&b.position.x))
    });
    for node in rows {
        let person = snapshot.person(node.person_id.as_str());
        nodes.add_row(vec![
            node.person_id.to_string(),
            person.map(|p| p.display_name()).unwrap_or_default(),
            person.and_then(|p| p.lifespan()).unwrap_or_default(),
            node.generation.to_string(),
            format!("{:.0}", node.position.x),
            format!("{:.0}", node.position.y),
        ]);
    }
    println!("{}", nodes);
    println!("{} person(s) in {} generation(s)", tree.nodes.len(), tree.depth());

    if tree.edges.is_empty() {
        return;
    }

    let mut edges = Table::new();
    edges.set_content_arrangement(ContentArrangement::Dynamic);
    edges.set_header(vec!["Source", "Target", "Kind", "Label"]);
    for edge in &tree.edges {
        edges.add_row(vec![
            edge.source_id.to_string(),
            edge.target_id.to_string(),
            edge.kind.to_string(),
            edge.label.to_string(),
        ]);
    }
    println!("{}", edges);
    println!("{} edge(s)", tree.edges.len());
}
