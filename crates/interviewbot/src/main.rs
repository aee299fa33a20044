mod api;
mod chat;
mod config;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use interviewbot_core::{InterviewController, PersonaCatalog};
use interviewbot_llm::{create_service, CompletionService, ProviderType};
use interviewbot_logging::{init_tracing, LogFormat, Logger};

use crate::config::{Overrides, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "interviewbot",
    about = "Mock product-management interviews with an LLM interviewer",
    version,
    author
)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatChoice,

    /// Tracing level when RUST_LOG is unset
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Also append session events as JSON lines to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Working directory used to find interviewbot.toml (default: current directory)
    #[arg(short = 'd', long, global = true)]
    working_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the web interview page and JSON API
    Serve {
        /// Port to listen on (default: 8501)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Open the page in a browser once listening
        #[arg(long)]
        open: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// Run an interview in the terminal
    Chat {
        #[command(flatten)]
        provider: ProviderArgs,
    },
    /// List interviewer personas
    Personas,
}

#[derive(Args, Debug, Clone)]
struct ProviderArgs {
    /// Completion provider
    #[arg(long, value_enum)]
    provider: Option<ProviderChoice>,

    /// Model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long)]
    temperature: Option<f32>,
}

impl ProviderArgs {
    fn into_overrides(self) -> Overrides {
        Overrides {
            provider: self.provider.map(Into::into),
            model: self.model,
            temperature: self.temperature,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderChoice {
    Openai,
    Echo,
}

impl From<ProviderChoice> for ProviderType {
    fn from(choice: ProviderChoice) -> Self {
        match choice {
            ProviderChoice::Openai => ProviderType::OpenAi,
            ProviderChoice::Echo => ProviderType::Echo,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);

    let personas = PersonaCatalog::builtin().context("Built-in persona table is invalid")?;

    let working_dir = match cli.working_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Personas => {
            print_personas(&personas);
            Ok(())
        }
        Commands::Serve {
            port,
            host,
            open,
            provider,
        } => {
            let overrides = Overrides {
                host,
                port,
                ..provider.into_overrides()
            };
            let settings = Settings::load(&working_dir, &overrides)?;
            let logger = build_logger(Logger::new(log_format), cli.log_file.as_ref())?;
            let controller = build_controller(&settings, personas, logger.clone())?;
            server::run(&settings, controller, logger, open).await
        }
        Commands::Chat { provider } => {
            let settings = Settings::load(&working_dir, &provider.into_overrides())?;
            // Console event output would interleave with the conversation
            let logger = build_logger(Logger::quiet(), cli.log_file.as_ref())?;
            let controller = build_controller(&settings, personas, logger)?;
            chat::run(&controller).await
        }
    }
}

fn build_logger(logger: Logger, log_file: Option<&PathBuf>) -> Result<Arc<Logger>> {
    let logger = match log_file {
        Some(path) => logger
            .with_file(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => logger,
    };
    Ok(Arc::new(logger))
}

fn build_controller(
    settings: &Settings,
    personas: PersonaCatalog,
    logger: Arc<Logger>,
) -> Result<Arc<InterviewController>> {
    let service: Arc<dyn CompletionService> =
        create_service(settings.provider, settings.completion.clone())
            .with_context(|| format!("Failed to create {} completion service", settings.provider))?
            .into();

    Ok(Arc::new(InterviewController::new(service, personas, logger)))
}

fn print_personas(personas: &PersonaCatalog) {
    for persona in personas.all() {
        println!(
            "{:<18} {}",
            persona.id.as_str().cyan(),
            persona.option_label().bold()
        );
    }
}
