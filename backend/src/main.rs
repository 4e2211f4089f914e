use std::path::PathBuf;

use clap::Parser;
use server::config::Config;

/// Flags override the matching environment variables.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Directory holding subjects.json and pyqs.json.
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Public root, PDFs are served from its pdfs/ directory.
    #[arg(long, env = "PUBLIC_DIR")]
    public_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    server::init_tracing();

    let mut config = Config::load()?;

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(public_dir) = args.public_dir {
        config.public_dir = public_dir;
    }

    tracing::info!(
        "Data directory {}, public directory {}",
        config.data_dir.display(),
        config.public_dir.display()
    );

    server::start_server(config).await
}
