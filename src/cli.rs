use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "underline", about = "Durable highlights for article text", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use a different database file
    #[arg(long, global = true)]
    pub db: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List annotated articles, most recent first
    List,
    /// Highlight a selection of an article's text
    Add(AddArgs),
    /// Print an article with its highlights
    Show(ShowArgs),
    /// Delete every highlight of an article
    Remove(RemoveArgs),
    /// Print the normalized form of a text file
    Normalize(NormalizeArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Article JSON as returned by the article API
    #[arg(long)]
    pub article: PathBuf,
    /// Selection start, in UTF-16 units of the normalized text
    #[arg(long)]
    pub start: usize,
    /// Selection length, in UTF-16 units
    #[arg(long)]
    pub length: usize,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Article JSON as returned by the article API
    #[arg(long)]
    pub article: PathBuf,
    /// Panel width to wrap at
    #[arg(long)]
    pub width: Option<usize>,
    /// Which text to read
    #[arg(long, value_enum, default_value_t = ReadingMode::English)]
    pub mode: ReadingMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReadingMode {
    /// English transcript with highlights
    #[default]
    English,
    /// Chinese translation only
    Chinese,
    /// Each English paragraph followed by its translation
    Parallel,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub article_id: String,
}

#[derive(Args)]
pub struct NormalizeArgs {
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "underline", "add", "--article", "a.json", "--start", "4", "--length", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.article, PathBuf::from("a.json"));
                assert_eq!((args.start, args.length), (4, 3));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_show_mode() {
        let cli = Cli::try_parse_from(["underline", "show", "--article", "a.json"]).unwrap();
        match cli.command {
            Commands::Show(args) => assert_eq!(args.mode, ReadingMode::English),
            _ => panic!("expected show"),
        }

        let cli = Cli::try_parse_from([
            "underline", "show", "--article", "a.json", "--mode", "chinese",
        ])
        .unwrap();
        match cli.command {
            Commands::Show(args) => assert_eq!(args.mode, ReadingMode::Chinese),
            _ => panic!("expected show"),
        }

        assert!(
            Cli::try_parse_from(["underline", "show", "--article", "a.json", "--mode", "french"])
                .is_err()
        );
    }
}
