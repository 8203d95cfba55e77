//! Downloads a cross-encoder model into a local directory the server can load.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rerank::config::Config;
use rerank::constants::DEFAULT_MODEL_NAME;
use rerank::hub::{DownloadTarget, HubClient};
use rerank::registry::ModelRegistry;

const MIRROR_HINT: &str = "https://hf-mirror.com";

#[derive(Debug, Parser)]
#[command(name = "rerank-download", version, about = "Download a rerank model")]
struct Args {
    /// Registered model name or hub repository id (`org/name`).
    #[arg(default_value = DEFAULT_MODEL_NAME)]
    model: String,

    /// Target directory. Required for models outside the built-in catalog.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Download into a non-empty target directory, replacing files already there.
    #[arg(long)]
    force: bool,

    /// Root of the built-in models' local directories.
    #[arg(long, env = "RERANK_MODELS_DIR", default_value = "models")]
    models_dir: PathBuf,

    /// Hugging Face compatible endpoint.
    #[arg(long, env = "HF_ENDPOINT", default_value = "https://huggingface.co")]
    endpoint: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Download failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let registry = ModelRegistry::builtin(&args.models_dir);

    let target = DownloadTarget::resolve(&registry, &args.model, args.dir)?;
    target.check_writable(args.force)?;

    println!("Model:  {}", target.repo_id);
    println!("Target: {}", target.dir.display());

    let hub = HubClient::new(args.endpoint, Config::default().cache_dir);
    let files = match hub
        .download_model_to(&target.repo_id, &target.dir, args.force)
        .await
    {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Hint: check network access, or use a mirror:");
            eprintln!("      export HF_ENDPOINT={MIRROR_HINT}");
            eprintln!("      manual download: {}/{}", hub.endpoint(), target.repo_id);
            return Err(e.into());
        }
    };

    println!("Downloaded {} files:", files.len());
    for file in &files {
        println!("  - {}", file.display());
    }
    println!("Start the server with RERANK_MODELS_DIR={}", args.models_dir.display());

    Ok(())
}
