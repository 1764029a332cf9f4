use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

const DEFAULT_LIBRARY_PATH: &str = "library.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdoutはMCPプロトコル専用
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let library_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_PATH));

    bookshelf_mcp::interface::mcp::run(library_path).await
}
