//! Dispatches one request against the tutorial app and prints the response.
//!
//! ```text
//! tutorial GET /hello/World
//! tutorial --config tutorial.toml POST /items --body '{"name":"pen","price":3}'
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Uri};
use tollway::RequestParts;
use tollway_config::ConfigLoader;
use tollway_telemetry::{init_telemetry, render_metrics};
use tutorial::{build_app, settings_from};

#[derive(Parser)]
#[command(name = "tutorial")]
#[command(about = "Dispatch a request against the Tollway tutorial app", long_about = None)]
struct Cli {
    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON request body
    #[arg(short, long)]
    body: Option<String>,

    /// Print Prometheus metrics after the response
    #[arg(long)]
    metrics: bool,

    /// HTTP method
    method: String,

    /// Request target, e.g. `/search?q=foo`
    uri: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new().with_defaults();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path)?;
    }
    let config = loader.with_env_prefix("TOLLWAY").with_dotenv()?.load()?;

    init_telemetry(&config.telemetry())?;

    let app = build_app(settings_from(&config))?;
    tracing::info!(routes = app.routes().len(), title = %app.settings().title, "App ready");

    let method = Method::from_bytes(cli.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid method '{}'", cli.method))?;
    let uri: Uri = cli
        .uri
        .parse()
        .with_context(|| format!("invalid uri '{}'", cli.uri))?;

    let mut request = RequestParts::new(method, uri);
    if let Some(body) = cli.body {
        request = request
            .with_body(body)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let response = app.handle(&request);

    println!("HTTP {}", response.status());
    for (name, value) in response.headers().iter() {
        println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
    }
    if let Some(body) = response.body() {
        println!();
        println!("{}", serde_json::to_string_pretty(&body.to_json())?);
    }

    if cli.metrics {
        match render_metrics() {
            Some(text) => print!("\n{text}"),
            None => eprintln!("metrics are disabled"),
        }
    }

    Ok(())
}
