use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "breaker-cli")]
#[command(about = "Management CLI for circuit breakers", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key, if the server requires one.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server status
    Status,
    /// List every breaker with its state and counts
    List,
    /// Show one breaker
    Show { name: String },
    /// Force a breaker open
    Open { name: String },
    /// Force a breaker closed and clear its counts
    Close { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
    }

    let request = match &cli.command {
        Commands::Status => client.get(format!("{}/admin/status", cli.url)),
        Commands::List => client.get(format!("{}/admin/breakers", cli.url)),
        Commands::Show { name } => client.get(format!("{}/admin/breakers/{}", cli.url, name)),
        Commands::Open { name } => {
            client.post(format!("{}/admin/breakers/{}/open", cli.url, name))
        }
        Commands::Close { name } => {
            client.post(format!("{}/admin/breakers/{}/close", cli.url, name))
        }
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await?;

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
