mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use reveal_av::{FfmpegPipeline, ToolRegistry};
use revealcut::compose::{compose, ComposeOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging.
    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "revealcut=trace,reveal_plan=trace,reveal_av=trace".to_string()
        } else {
            "revealcut=info,reveal_plan=info,reveal_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let tools = ToolRegistry::discover();

    // Fail before any work if a required tool is missing.
    tools.require("ffmpeg")?;
    tools.require("ffprobe")?;
    if cli.message.is_some() {
        tools.imagemagick()?;
    }

    if cli.verbose {
        for info in tools.check_all() {
            tracing::debug!(
                tool = %info.name,
                available = info.available,
                version = info.version.as_deref().unwrap_or("unknown"),
                "external tool"
            );
        }
    }

    let opts = ComposeOptions {
        original: cli.original.clone(),
        modified: cli.modified.clone(),
        output: cli.output.clone(),
        config: cli.plan_config(),
        seed: cli.seed,
    };

    let pipeline = FfmpegPipeline::new(tools);
    let summary = compose(&pipeline, &opts).await?;

    println!("{}", summary.one_line());
    Ok(())
}
