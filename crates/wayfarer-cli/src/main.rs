use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use wayfarer_core::{Config, Pipeline};

mod serve;

#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Travel research assistant with retrieval-augmented answers", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to ./wayfarer.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a travel question
    Ask {
        /// The question to answer
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Serve the pipeline over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3400)]
        port: u16,
    },
    /// Write a default wayfarer.toml to the current directory
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Ask { question } => {
            let question = question.join(" ");
            run_ask(&config, &question).await?;
        }
        Commands::Serve { port } => {
            serve::start_server(config, port).await?;
        }
        Commands::Init => {
            if std::path::Path::new("wayfarer.toml").exists() {
                println!("wayfarer.toml already exists, leaving it untouched.");
            } else {
                std::fs::write("wayfarer.toml", Config::default_config_string())?;
                println!("Wrote default configuration to wayfarer.toml");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

async fn run_ask(config: &Config, question: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template"),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    spinner.set_message("Researching live context...");
    let web_context = pipeline.research(question).await?;

    spinner.set_message("Retrieving relevant documents...");
    let documents = pipeline.retrieve(question).await?;

    spinner.set_message("Writing the answer...");

    if pipeline.supports_streaming() {
        spinner.finish_and_clear();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let stream = pipeline.synthesize_streaming(question, &web_context, &documents, tx);
        let print = async {
            let mut stdout = std::io::stdout();
            while let Some(chunk) = rx.recv().await {
                if !chunk.is_final {
                    print!("{}", chunk.text);
                    let _ = stdout.flush();
                }
            }
        };

        let (result, _) = tokio::join!(stream, print);
        result?;
        println!();
    } else {
        let answer = pipeline.synthesize(question, &web_context, &documents).await?;
        spinner.finish_and_clear();
        println!("{answer}");
    }

    Ok(())
}
