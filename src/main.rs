mod drawio;
mod error;
mod llm;
mod services;
mod sheet;
mod workflow;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use llm::LlmClient;
use llm::config::LlmConfig;
use services::inference::{DEFAULT_AI_MAX_TOKENS, build_prompt};
use services::pipeline::{self, PipelineError, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "sheet2drawio", about = "Turn a spreadsheet of workflow steps into a draw.io diagram")]
struct Cli {
    /// Spreadsheet holding `group`, `step`, `to-step` and `task` columns.
    #[arg(long, env = "WORKFLOW_INPUT")]
    input: PathBuf,

    /// Sheet to read.
    #[arg(long, env = "WORKFLOW_SHEET")]
    sheet: String,

    /// Diagram file to write; replaced if it exists.
    #[arg(long, env = "WORKFLOW_OUTPUT", default_value = "honda_workflow.xml")]
    output: PathBuf,

    /// Model identifier; defaults to `LLM_MODEL` or the provider default.
    #[arg(long)]
    model: Option<String>,

    #[arg(long, env = "AI_MAX_TOKENS", default_value_t = DEFAULT_AI_MAX_TOKENS)]
    max_tokens: u32,

    /// Also write the inferred structure as JSON.
    #[arg(long)]
    structure_out: Option<PathBuf>,

    /// Print the description lines and prompt, then stop before calling the model.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            input: self.input.clone(),
            sheet: self.sheet.clone(),
            output: self.output.clone(),
            max_tokens: self.max_tokens,
            structure_out: self.structure_out.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error::diagnostic(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), PipelineError> {
    let opts = cli.run_options();

    if cli.dry_run {
        let lines = pipeline::load(&opts)?;
        for line in &lines {
            println!("{line}");
        }
        println!();
        print!("{}", build_prompt(&lines));
        return Ok(());
    }

    let config = LlmConfig::from_env()?.with_model(cli.model);
    let client = LlmClient::from_config(config)?;
    tracing::info!(model = client.model(), "LLM client initialized");

    let summary = pipeline::run(&opts, &client).await?;
    println!(
        "Workflow diagram generated: {} ({} rows, {} nodes, {} connections)",
        summary.output.display(),
        summary.rows,
        summary.nodes,
        summary.connections
    );
    Ok(())
}
