use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use anki_flashgen::config::Config;
use anki_flashgen::engine::llm_client::ChatClient;
use anki_flashgen::engine::prompt_builder::PromptBuilder;
use anki_flashgen::engine::runner::TopicRunner;
use anki_flashgen::tools::{merge, repair};

const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Parser, Debug)]
#[command(
    name = "anki-flashgen",
    version,
    about = "Generate Anki flashcard CSV files with an LLM.",
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one CSV file per configured topic
    Generate {
        /// Configuration file (TOML)
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },
    /// Concatenate the generated CSV files into one
    Merge {
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        /// Directory holding the per-topic files. Defaults to the configured output_dir.
        #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
        input: Option<PathBuf>,
        /// Merged file. Defaults to the configured merged_file.
        #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
    /// Fix extra delimiters in every CSV file under a directory, in place
    Repair {
        /// Defaults to the current directory
        #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    if let Err(error) = run_cli() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate { config } => generate(Config::load(config.as_deref())?),
        Command::Merge {
            config,
            input,
            output,
        } => {
            let config = Config::load(config.as_deref())?;
            let input = input.unwrap_or(config.output_dir);
            let output = output.unwrap_or(config.merged_file);
            merge::merge_csv_files(&input, &output)?;
            Ok(())
        }
        Command::Repair { dir } => {
            let root = match dir {
                Some(dir) => dir,
                None => env::current_dir().context("failed to read the current directory")?,
            };
            repair::repair_csv_tree(&root)?;
            Ok(())
        }
    }
}

fn generate(config: Config) -> Result<()> {
    dotenvy::dotenv().ok();
    let api_key = env::var(API_KEY_ENV)
        .with_context(|| format!("missing {API_KEY_ENV}; set it in the environment or a .env file"))?;

    let client = ChatClient::new(&config, api_key).context("failed to build the HTTP client")?;
    let prompts = PromptBuilder::from_config(&config);
    let runner = TopicRunner::new(&client, &prompts, &config.output_dir);

    info!(
        "Generating {} topics with {} into {}",
        config.topics.len(),
        client.model(),
        config.output_dir.display()
    );
    let report = runner.run(&config.topics)?;
    info!("Done: {} written, {} failed", report.written(), report.failed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_takes_at_most_one_directory() {
        assert!(Cli::try_parse_from(["anki-flashgen", "repair", "a", "b"]).is_err());
    }

    #[test]
    fn bare_repair_has_no_directory() {
        let cli = Cli::try_parse_from(["anki-flashgen", "repair"]).unwrap();
        assert!(matches!(cli.command, Command::Repair { dir: None }));

        let cli = Cli::try_parse_from(["anki-flashgen", "repair", "decks"]).unwrap();
        match cli.command {
            Command::Repair { dir } => assert_eq!(dir, Some(PathBuf::from("decks"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn merge_paths_are_parsed() {
        let cli = Cli::try_parse_from([
            "anki-flashgen",
            "merge",
            "--input",
            "cards",
            "--output",
            "all.csv",
        ])
        .unwrap();
        match cli.command {
            Command::Merge {
                config,
                input,
                output,
            } => {
                assert_eq!(config, None);
                assert_eq!(input, Some(PathBuf::from("cards")));
                assert_eq!(output, Some(PathBuf::from("all.csv")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn generate_accepts_a_config_file() {
        let cli =
            Cli::try_parse_from(["anki-flashgen", "generate", "--config", "deck.toml"]).unwrap();
        match cli.command {
            Command::Generate { config } => assert_eq!(config, Some(PathBuf::from("deck.toml"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["anki-flashgen"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
