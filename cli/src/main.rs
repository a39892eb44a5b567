//! Galaxis CLI: rebuild and inspect concept-galaxy data directories
//!
//! Works against a JSON data directory: reads `concepts.json`, writes
//! `edges.json` and `positions.json`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use galaxis::graph::{Edge, Position, VectorStore};
use galaxis::layout::compute_positions;
use galaxis::{
    GalaxyStore, JsonStore, LayoutStrategy, PipelineConfig, PipelineRunner,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "galaxis", version, about = "Galaxis concept-galaxy pipeline CLI")]
struct Cli {
    /// Data directory holding concepts.json
    #[arg(long, default_value = "data", global = true, env = "GALAXIS_DATA_DIR")]
    data_dir: PathBuf,

    /// Optional pipeline config file (JSON); flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    Procedural,
    Force,
    Hybrid,
}

impl From<StrategyArg> for LayoutStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Procedural => LayoutStrategy::Procedural,
            StrategyArg::Force => LayoutStrategy::Force,
            StrategyArg::Hybrid => LayoutStrategy::Hybrid,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild edges and positions from the corpus
    Rebuild {
        /// Max neighbors per concept
        #[arg(long)]
        k: Option<usize>,

        /// Minimum cosine similarity for a semantic edge
        #[arg(long)]
        threshold: Option<f32>,

        /// Layout strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Recompute positions only, keeping the stored edge set
    Layout {
        /// Layout strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print corpus and output counts
    Stats,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Rebuild {
            k,
            threshold,
            strategy,
            seed,
        } => {
            if let Some(k) = k {
                config.k = k;
            }
            if let Some(threshold) = threshold {
                config.similarity_threshold = threshold;
            }
            if let Some(strategy) = strategy {
                config.layout.strategy = strategy.into();
            }
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            rebuild(&cli.data_dir, config).await
        }
        Commands::Layout { strategy, seed } => {
            if let Some(strategy) = strategy {
                config.layout.strategy = strategy.into();
            }
            if let Some(seed) = seed {
                config.seed = Some(seed);
            }
            relayout(&cli.data_dir, config).await
        }
        Commands::Stats => stats(&cli.data_dir).await,
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(PipelineConfig::default()),
    }
}

async fn rebuild(data_dir: &std::path::Path, config: PipelineConfig) -> Result<()> {
    let store = Arc::new(JsonStore::new(data_dir));
    let runner = PipelineRunner::new(store, config)?;

    let stats = runner.run().await?;
    println!(
        "Rebuilt {} concepts: {} semantic edges, {} category edges, {} positions in {:.2}s",
        stats.concepts,
        stats.semantic_edges,
        stats.category_edges,
        stats.positions,
        stats.elapsed.as_secs_f64()
    );
    Ok(())
}

async fn relayout(data_dir: &std::path::Path, config: PipelineConfig) -> Result<()> {
    config.validate()?;
    let store = JsonStore::new(data_dir);

    let concepts = store.load_concepts().await?;
    let corpus = VectorStore::from_concepts(concepts)?;

    let edges_path = data_dir.join("edges.json");
    let edges: Vec<Edge> = if edges_path.exists() {
        let file = std::fs::File::open(&edges_path)?;
        serde_json::from_reader(file)
            .with_context(|| format!("parsing {}", edges_path.display()))?
    } else {
        Vec::new()
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let positions: Vec<Position> =
        compute_positions(&corpus, &edges, &config.layout, &mut rng);
    store.replace_positions(&positions).await?;

    println!(
        "Recomputed {} positions over {} edges",
        positions.len(),
        edges.len()
    );
    Ok(())
}

async fn stats(data_dir: &std::path::Path) -> Result<()> {
    let store = JsonStore::new(data_dir);
    let concepts = store.load_concepts().await?;

    let count_file = |name: &str| -> Result<usize> {
        let path = data_dir.join(name);
        if !path.exists() {
            return Ok(0);
        }
        let file = std::fs::File::open(&path)?;
        let values: Vec<serde_json::Value> = serde_json::from_reader(file)?;
        Ok(values.len())
    };

    println!("Data directory: {}", data_dir.display());
    println!("  concepts:  {}", concepts.len());
    println!("  edges:     {}", count_file("edges.json")?);
    println!("  positions: {}", count_file("positions.json")?);

    let mut categories: Vec<(String, usize)> = {
        let mut map = std::collections::BTreeMap::new();
        for concept in &concepts {
            *map.entry(concept.category.as_str().to_string()).or_insert(0) += 1;
        }
        map.into_iter().collect()
    };
    categories.sort_by(|a, b| b.1.cmp(&a.1));
    for (category, count) in categories {
        println!("    {:<30} {}", category, count);
    }
    Ok(())
}
