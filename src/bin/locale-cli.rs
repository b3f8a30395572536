use std::path::PathBuf;

use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use locale_gateway::config::{self, GatewayConfig};
use locale_gateway::http::IncomingRequest;
use locale_gateway::routing::{LocaleRouter, PassThrough, RouteOutcome};

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Inspect locale routing for the locale gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a request would be routed, without a running gateway
    Resolve {
        /// Request target, e.g. "/donate?campaign=42"
        target: String,

        /// Value of the locale cookie
        #[arg(long)]
        cookie: Option<String>,

        /// Accept-Language header value
        #[arg(long)]
        accept_language: Option<String>,

        /// Gateway configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Query a running gateway's health endpoint
    Health {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            target,
            cookie,
            accept_language,
            config,
        } => {
            let config = match config {
                Some(path) => config::load_config(&path)?,
                None => GatewayConfig::default(),
            };
            let router = LocaleRouter::from_config(&config.locale)?;

            let mut request = IncomingRequest::from_target(&target);
            if let Some(cookie) = cookie {
                request = request.with_cookie(router.cookie_name(), cookie);
            }
            if let Some(header) = accept_language {
                request = request.with_header(ACCEPT_LANGUAGE, HeaderValue::from_str(&header)?);
            }

            let decision = describe(&router, router.route(&request));
            println!("{}", serde_json::to_string_pretty(&decision)?);
        }
        Commands::Health { url } => {
            let res = reqwest::get(format!("{}/api/health", url.trim_end_matches('/'))).await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn describe(router: &LocaleRouter, outcome: RouteOutcome<'_>) -> Value {
    match outcome {
        RouteOutcome::Continue(PassThrough::Bypassed) => json!({ "outcome": "bypass" }),
        RouteOutcome::Continue(PassThrough::Prefixed(locale)) => json!({
            "outcome": "prefixed",
            "locale": locale.code(),
            "direction": locale.direction().as_str(),
        }),
        RouteOutcome::RedirectTo(location) => json!({
            "outcome": "redirect",
            "locale": router.locales().prefix_of(&location).map(|l| l.code()),
            "location": location,
        }),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
