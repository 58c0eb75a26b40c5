//! cursorflow CLI: run, validate and explain YAML pipelines.

use clap::{Parser, Subcommand};
use cursorflow_exec::{Engine, EngineConfig};
use cursorflow_planner::{compile, parse_yaml_pipeline, Pipeline};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cursorflow")]
#[command(about = "cursorflow: lazy cursor pipelines over JSON values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a pipeline from a YAML file
    Run {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,

        /// Cap on collected values (overrides config)
        #[arg(long)]
        max_output: Option<usize>,

        /// Trace every value seen by `tap` steps (overrides config)
        #[arg(long)]
        trace_values: bool,
    },

    /// Validate a pipeline YAML file (syntax and expressions)
    Validate {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },

    /// Show the compiled stages of a pipeline
    Explain {
        /// Path to the pipeline YAML file
        #[arg(short, long)]
        pipeline: PathBuf,
    },
}

fn main() {
    install_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            pipeline,
            max_output,
            trace_values,
        } => {
            if let Err(e) = run_pipeline(&pipeline, max_output, trace_values) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { pipeline } => {
            if let Err(e) = validate_pipeline(&pipeline) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Pipeline is valid");
        }
        Commands::Explain { pipeline } => {
            if let Err(e) = explain_pipeline(&pipeline) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_pipeline(path: &PathBuf) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let yaml_content = fs::read_to_string(path)?;
    let pipeline = parse_yaml_pipeline(&yaml_content)?;
    tracing::debug!(path = %path.display(), steps = pipeline.steps.len(), "pipeline loaded");
    Ok(pipeline)
}

fn run_pipeline(
    pipeline_path: &PathBuf,
    max_output: Option<usize>,
    trace_values: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut pipeline = load_pipeline(pipeline_path)?;
    apply_cli_overrides(&mut pipeline, max_output, trace_values);

    let engine = Engine::new(EngineConfig::from_env());
    let report = engine.run(&pipeline)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn validate_pipeline(pipeline_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = load_pipeline(pipeline_path)?;
    let _ = compile(&pipeline)?;
    Ok(())
}

fn explain_pipeline(pipeline_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = load_pipeline(pipeline_path)?;
    let plan = compile(&pipeline)?;
    let config = EngineConfig::from_env().with_overrides(&plan.config);

    println!("Pipeline Plan");
    println!("=============");
    println!();
    print!("{}", plan.explain());
    println!();
    println!(
        "Max output: {}",
        config
            .max_output
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
    );
    println!("Trace values: {}", config.trace_values);
    Ok(())
}

/// CLI flags sit above the pipeline's own `config:` block, which sits above
/// the environment.
fn apply_cli_overrides(pipeline: &mut Pipeline, max_output: Option<usize>, trace_values: bool) {
    if max_output.is_none() && !trace_values {
        return;
    }
    let config = pipeline.config.get_or_insert_with(Default::default);
    if let Some(n) = max_output {
        config.max_output = Some(n);
    }
    if trace_values {
        config.trace_values = Some(true);
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_cli_overrides, parse_yaml_pipeline, EngineConfig};

    #[test]
    fn cli_overrides_higher_priority_than_config() {
        let mut pipeline =
            parse_yaml_pipeline("config: { max_output: 5 }\nsource: { values: [1] }\n").unwrap();
        apply_cli_overrides(&mut pipeline, Some(2), false);
        let config = pipeline.config.as_ref().unwrap();
        assert_eq!(config.max_output, Some(2));
        assert_eq!(config.trace_values, None);

        let effective = EngineConfig::default().with_overrides(config);
        assert_eq!(effective.max_output, Some(2));
    }

    #[test]
    fn no_flags_leave_pipeline_untouched() {
        let mut pipeline = parse_yaml_pipeline("source: { values: [1] }\n").unwrap();
        apply_cli_overrides(&mut pipeline, None, false);
        assert!(pipeline.config.is_none());

        apply_cli_overrides(&mut pipeline, None, true);
        assert_eq!(pipeline.config.unwrap().trace_values, Some(true));
    }
}
