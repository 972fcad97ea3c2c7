use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gedgraph::graph::SplitMode;
use gedgraph::render::describe_relationship;
use gedgraph::{
    ChartKind, ChartLayoutBuilder, Config, DotRenderer, FamilyGraph, GedcomStore, GedgraphError,
    PathFinder, RelationshipPath, Xref,
};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gedgraph")]
#[command(about = "Generate genealogical charts (GraphViz DOT) from GEDCOM files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ancestors of one individual
    Pedigree {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// Ancestors above the individual, descendants (or the mother's line) below
    Hourglass {
        #[command(flatten)]
        chart: ChartArgs,
        /// descendants | ancestor-split
        #[arg(long)]
        split: Option<String>,
    },
    /// Hourglass laid out left to right
    Bowtie {
        #[command(flatten)]
        chart: ChartArgs,
        /// descendants | ancestor-split
        #[arg(long)]
        split: Option<String>,
    },
    /// Shortest relationship between two individuals
    Relationship {
        /// Path to GEDCOM file
        gedcom: PathBuf,
        /// First individual ID (e.g. @I1@ or I1)
        individual1: String,
        /// Second individual ID
        individual2: String,
        /// Maximum search depth
        #[arg(short = 'd', long)]
        max_depth: Option<usize>,
        /// Output DOT file path
        #[arg(short, long)]
        output: PathBuf,
        /// Also print the ranked paths as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Path to GEDCOM file
    gedcom: PathBuf,
    /// Root individual ID (e.g. @I1@ or I1)
    individual: String,
    /// Number of generations
    #[arg(short, long)]
    generations: Option<usize>,
    /// Output DOT file path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Pedigree { chart } => run_banded(&config, ChartKind::Pedigree, &chart, None),
        Command::Hourglass { chart, split } => {
            run_banded(&config, ChartKind::Hourglass, &chart, split.as_deref())
        }
        Command::Bowtie { chart, split } => {
            run_banded(&config, ChartKind::Bowtie, &chart, split.as_deref())
        }
        Command::Relationship {
            gedcom,
            individual1,
            individual2,
            max_depth,
            output,
            json,
        } => run_relationship(
            &config,
            &gedcom,
            &individual1,
            &individual2,
            max_depth.unwrap_or(config.chart.max_depth),
            &output,
            json,
        ),
    }
}

fn load_store(path: &Path) -> Result<GedcomStore> {
    if !path.exists() {
        anyhow::bail!("GEDCOM file not found: {}", path.display());
    }
    GedcomStore::from_path(path)
        .with_context(|| format!("Failed to load GEDCOM file: {}", path.display()))
}

fn resolve(store: &GedcomStore, id: &str) -> Result<Xref> {
    store
        .resolve(id)
        .ok_or_else(|| GedgraphError::IndividualNotFound(id.to_string()).into())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

fn run_banded(
    config: &Config,
    kind: ChartKind,
    args: &ChartArgs,
    split: Option<&str>,
) -> Result<()> {
    let generations = args.generations.unwrap_or(config.chart.generations);
    let split: SplitMode = match split {
        Some(name) => name.parse()?,
        None => config.split_mode()?,
    };

    let store = load_store(&args.gedcom)?;
    let root = resolve(&store, &args.individual)?;

    log::info!("Building {} chart for {} ({} generations)", kind, root, generations);
    let map = ChartLayoutBuilder::new(&store)
        .build_banded(kind, root.as_str(), generations, split)?
        .ok_or_else(|| GedgraphError::IndividualNotFound(root.to_string()))?;
    let dot = DotRenderer::new(&store)
        .with_style(config.style.clone())
        .render_map(kind, &map, generations, split);
    write_output(&args.output, &dot)?;

    println!("{} chart generated: {}", kind.title(), args.output.display());
    println!("Individual: {} ({})", store.display_name(&root), root);
    println!("Generations: {}", generations);
    if kind != ChartKind::Pedigree {
        println!("Split: {}", split);
    }
    println!(
        "Individuals: {} across generations {}..={}",
        map.individual_count(),
        map.min_generation(),
        map.max_generation()
    );

    Ok(())
}

fn run_relationship(
    config: &Config,
    gedcom: &Path,
    id1: &str,
    id2: &str,
    max_depth: usize,
    output: &Path,
    json: bool,
) -> Result<()> {
    let store = load_store(gedcom)?;
    let from = resolve(&store, id1)?;
    let to = resolve(&store, id2)?;

    log::info!("Searching relationship {} -> {} (max depth {})", from, to, max_depth);
    let paths = PathFinder::new(&store)
        .with_ranking(config.ranking()?)
        .get_shortest_paths(from.as_str(), to.as_str(), max_depth);

    let best = match paths.first() {
        Some(best) => best,
        None => {
            return Err(GedgraphError::NoRelationship {
                from: format!("{} ({})", store.display_name(&from), from),
                to: format!("{} ({})", store.display_name(&to), to),
            }
            .into())
        }
    };

    let dot = DotRenderer::new(&store)
        .with_style(config.style.clone())
        .relationship(&paths)?;
    write_output(output, &dot)?;

    if json {
        let report = relationship_report(&store, best, &paths);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Relationship chart generated: {}", output.display());
    println!("From: {} ({})", store.display_name(&from), from);
    println!("To: {} ({})", store.display_name(&to), to);
    println!("Relationship: {}", describe_relationship(&store, best));
    println!("Path length: {} steps", best.length());
    println!("Generation distance: {}", best.generation_distance());
    if paths.len() > 1 {
        println!("Note: {} equally short paths found, showing first", paths.len());
    }

    Ok(())
}

/// `--json` report: the best path's summary plus every ranked path
fn relationship_report(
    store: &GedcomStore,
    best: &RelationshipPath,
    paths: &[RelationshipPath],
) -> serde_json::Value {
    serde_json::json!({
        "from": best.start,
        "to": best.end,
        "relationship": describe_relationship(store, best),
        "generation_distance": best.generation_distance(),
        "paths": paths,
    })
}
