use std::fs::File;

use clap::Parser;
use rxcomplete::{config::Cli, vocabulary::Vocabulary, App};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // the prompt owns the terminal, so logs go to a file
    let file = File::create(&cli.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(file)
        .with_ansi(false)
        .init();

    info!("Starting rxcomplete v{}", env!("CARGO_PKG_VERSION"));

    let mut vocabulary = Vocabulary::load_or_sample(&cli.vocabulary, &cli.column).await?;
    if cli.sorted {
        vocabulary.sort();
    }

    let mut app = App::new(vocabulary, cli.limit);

    if let Some(prefix) = cli.query {
        for entry in app.index().search_prefix(&prefix, cli.limit) {
            println!("{entry}");
        }
        return Ok(());
    }

    app.start().await?;

    Ok(())
}
