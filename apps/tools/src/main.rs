use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, StatusCode};
use shared::{domain::StateData, protocol::STATE_ROUTE};
use url::Url;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current gateway state.
    Get,
    /// Replace the gateway state.
    Set { state: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let endpoint = state_endpoint(&cli.server_url)?;
    let http = Client::new();

    let data = match cli.command {
        Command::Get => {
            let response = http
                .get(endpoint.clone())
                .send()
                .await
                .with_context(|| format!("failed to reach {endpoint}"))?;
            read_state(response).await?
        }
        Command::Set { state } => {
            let response = http
                .put(endpoint.clone())
                .json(&StateData { state })
                .send()
                .await
                .with_context(|| format!("failed to reach {endpoint}"))?;
            read_state(response).await?
        }
    };

    println!("state={}", data.state);
    Ok(())
}

fn state_endpoint(server_url: &str) -> Result<Url> {
    let base = Url::parse(server_url).with_context(|| format!("invalid server url '{server_url}'"))?;
    if !matches!(base.scheme(), "http" | "https") {
        bail!("server_url must start with http:// or https://");
    }
    base.join(STATE_ROUTE)
        .with_context(|| format!("cannot build state endpoint from '{server_url}'"))
}

async fn read_state(response: reqwest::Response) -> Result<StateData> {
    match response.status() {
        StatusCode::OK => Ok(response.json().await?),
        StatusCode::UNPROCESSABLE_ENTITY => bail!("server rejected the request body"),
        status => bail!("server responded with {status}"),
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
