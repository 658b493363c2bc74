mod config;
mod data_uri;
mod gemini;
mod llm_client;
mod logging;
mod models;
mod prompts;
mod provider;
mod request_id;
mod router;
mod service;

use clap::Parser;
use config::Config;
use router::AppState;
use service::SmileService;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(name = "smile-relay")]
#[command(about = "Relays smile photos to Gemini for a makeover image and a treatment plan")]
struct Args {
    #[arg(short, long, env = "IP", default_value = "0.0.0.0")]
    ip: String,

    #[arg(short, long, env = "PORT", default_value = "5001")]
    port: u16,

    /// Google Generative Language API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "GEMINI_API_BASE", default_value = llm_client::DEFAULT_API_BASE)]
    api_base: String,

    /// Model that renders the transformed smile
    #[arg(long, default_value = service::DEFAULT_MODEL)]
    image_model: String,

    /// Model that writes the treatment plan
    #[arg(long, default_value = service::DEFAULT_MODEL)]
    analysis_model: String,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file, capped at 10 MiB
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = Level::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using INFO level.", args.log_level);
        Level::INFO
    });
    logging::init_logging(log_level, args.log_file.as_deref())?;

    let config = Config::new(args.api_key, args.api_base, args.image_model, args.analysis_model)?;
    info!("Configuration loaded: {:?}", config);

    let client_builder = reqwest::Client::builder();
    let client_builder = if let Some(proxy) = &args.proxy {
        client_builder.proxy(reqwest::Proxy::all(proxy)?)
    } else {
        client_builder
    };
    let http_client = Arc::new(client_builder.build()?);

    let llm_client = Arc::new(llm_client::LlmClient::new(http_client, config.api_base, config.api_key));
    let service = SmileService::new(llm_client, config.image_model, config.analysis_model);
    let app = router::app(AppState {
        service: Arc::new(service),
    });

    let bind_address = format!("{}:{}", args.ip, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Smile analyzer backend listening at http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
