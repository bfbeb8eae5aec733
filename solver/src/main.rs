use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use dichromate::config::OptimizerConfig;
use dichromate::problem::Problem;
use dichromate::Optimizer;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "solver")]
#[command(about = "Place owned heroes into puzzle slots to maximize faction synergy", long_about = None)]
#[command(version)]
struct Args {
    /// Problem description (JSON)
    problem: PathBuf,

    /// Optimizer settings (TOML); defaults apply when omitted
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive("dichromate=info".parse()?)
        .from_env_lossy();
    // stdout carries the result, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &args.config {
        Some(path) => OptimizerConfig::load(path)?,
        None => OptimizerConfig::default(),
    };

    let problem = Problem::from_json(&fs::read_to_string(&args.problem)?)?;
    info!(
        event = "problem_loaded",
        path = %args.problem.display(),
        characters = problem.characters.len(),
        graphs = problem.graphs.len(),
    );

    let optimizer = Optimizer::new(config);
    let report = problem.solve(&optimizer);
    let sheet = problem.score_sheet(&optimizer.config().scoring, &report.assignment);

    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
        "report": report,
        "scores": sheet,
    }))?);

    Ok(())
}
