use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    giphy::cli::run().await
}
