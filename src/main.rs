//! Manus CLI - AI-assisted YouTube script writing
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use manus::{agent, render, ui, Config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "manus")]
#[command(author, version, about = "TUI for AI-assisted YouTube script writing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a script for a video topic
    Generate {
        /// Video topic (prompted for interactively when omitted)
        topic: Option<String>,
        /// Overall mood, e.g. "Educational" or "Humorous"
        #[arg(long)]
        mood: Option<String>,
        /// Presentation tone, e.g. "Conversational" or "Storytelling"
        #[arg(long)]
        tone: Option<String>,
        /// Target audience, e.g. "Beginners"
        #[arg(long)]
        audience: Option<String>,
        /// Expected video length, e.g. "Medium (10-20 mins)"
        #[arg(long)]
        length: Option<String>,
        /// Also write the script as plain text to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            topic,
            mood,
            tone,
            audience,
            length,
            output,
        }) => {
            if !atty::is(atty::Stream::Stdout) {
                colored::control::set_override(false);
            }

            let topic = match topic {
                Some(topic) => topic,
                None => dialoguer::Input::<String>::new()
                    .with_prompt("Video topic")
                    .interact_text()?,
            };
            let topic = topic.trim().to_string();
            if topic.is_empty() {
                anyhow::bail!("topic must not be empty");
            }

            let mut config = Config::load()?;

            // CLI flags override the configured generation defaults
            if let Some(mood) = mood {
                config.generation.mood = mood;
            }
            if let Some(tone) = tone {
                config.generation.tone = tone;
            }
            if let Some(audience) = audience {
                config.generation.audience = audience;
            }
            if let Some(length) = length {
                config.generation.length = length;
            }

            println!("Generating script for '{}'...\n", topic);
            let script = agent::generate(&topic, &config).await?;

            render::print_script(&script);

            if let Some(path) = output {
                std::fs::write(&path, render::script_to_text(&script))?;
                println!("\nSaved script to {}", path.display());
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "manus", &mut std::io::stdout());
        }
        None => {
            // Default: Launch the TUI
            ui::run().await?;
        }
    }

    Ok(())
}
