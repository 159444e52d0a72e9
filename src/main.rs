use std::sync::Arc;

use clap::Parser;
use clap::Subcommand;
use vivirag::config::AppConfig;
use vivirag::config::Credentials;
use vivirag::logging;
use vivirag::RagAgent;
use vivirag::Result;

#[derive(Parser)]
#[command(name = "vivirag")]
#[command(about = "Vivi IA RAG agent for SIAPE and public administration queries")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host address to bind (defaults to the configured server host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (defaults to the configured server port)
        #[arg(long)]
        port: Option<u16>,
        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Ask the agent a single question and print the answer
    Ask {
        /// The question to answer
        pergunta: String,
    },
    /// Verify configuration and required environment variables
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    let config = Arc::new(config);

    match cli.command {
        Commands::Serve {
            host,
            port,
            no_cors,
        } => {
            logging::init_logging(&config)?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            vivirag::api::serve_api(config.clone(), host, port, !no_cors).await
        }
        Commands::Ask { pergunta } => {
            logging::init_logging(&config)?;
            let credentials = Credentials::from_env()?;
            let agent = RagAgent::new(&config, &credentials).await?;
            let resposta = agent.answer(&pergunta).await;
            println!("{resposta}");
            Ok(())
        }
        Commands::CheckConfig => {
            logging::init_simple_logging()?;
            check_config(&config)
        }
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    println!("Configuration:");
    println!("  server               = {}:{}", config.server.host, config.server.port);
    println!("  retrieval.top_k      = {}", config.retrieval.top_k);
    println!("  retrieval.model      = {}", config.retrieval.embedding_model);
    println!("  generation.model     = {}", config.generation.model);
    println!(
        "  retry                = {} attempts, {} ms apart",
        config.retry.max_attempts, config.retry.delay_ms
    );
    println!();

    println!("Environment:");
    let mut all_present = true;
    for (name, present) in Credentials::presence_from_env() {
        println!("  {} {name}", if present { "✅" } else { "❌" });
        all_present &= present;
    }

    if !all_present {
        println!();
        println!("Missing variables must be set before the agent can start.");
        std::process::exit(1);
    }

    Ok(())
}
