use std::io;

use anyhow::Context;
use clap::Parser;

use underline_reader::app::App;
use underline_reader::cli::{Cli, Commands};
use underline_reader::config::Config;
use underline_reader::error::Result;
use underline_reader::models::ArticleSource;
use underline_reader::selection::Selection;
use underline_reader::text::normalize;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Normalizing a file needs neither config nor storage
    if let Commands::Normalize(args) = &cli.command {
        let raw = std::fs::read_to_string(&args.file)
            .with_context(|| format!("reading {}", args.file.display()))?;
        println!("{}", normalize(&raw));
        return Ok(());
    }

    let mut config = Config::load()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let app = App::new(&config).await?;
    let mut stdout = io::stdout();

    match cli.command {
        Commands::List => app.list(&mut stdout)?,
        Commands::Add(args) => {
            let article = ArticleSource::from_file(&args.article)?;
            let record = app
                .add(&article, Selection::new(args.start, args.length))
                .await?;
            println!(
                "{} now has {} highlights",
                record.article_title,
                record.highlight_count()
            );
        }
        Commands::Show(args) => {
            let article = ArticleSource::from_file(&args.article)?;
            app.show(&mut stdout, &article, args.width, args.mode)?;
        }
        Commands::Remove(args) => {
            if app.remove(&args.article_id).await? {
                println!("Removed highlights for {}", args.article_id);
            } else {
                println!("No highlights for {}", args.article_id);
            }
        }
        Commands::Normalize(_) => {}
    }

    Ok(())
}
