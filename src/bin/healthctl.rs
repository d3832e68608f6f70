use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "healthctl")]
#[command(about = "Command-line client for the health checker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness check, prints "world"
    Hello,
    /// List servers, probing each one unless --stored is given
    Servers {
        /// Accepted by the service but does not narrow the list
        #[arg(long)]
        id: Option<String>,
        /// Show stored state without probing
        #[arg(long)]
        stored: bool,
    },
    /// Show one server's stored state
    Show { id: String },
    /// Probe one server now
    Probe { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Hello => {
            let res = client.get(format!("{}/hello", base)).send().await?;
            let status = res.status();
            let text = res.text().await?;
            if status.is_success() {
                println!("{}", text);
            } else {
                eprintln!("Error: service returned status {}", status);
            }
        }
        Commands::Servers { id, stored } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let Some(id) = id {
                query.push(("id", id));
            }
            if stored {
                query.push(("live", "false".to_string()));
            }
            let res = client
                .get(format!("{}/servers", base))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Show { id } => {
            let res = client.get(format!("{}/servers/{}", base, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Probe { id } => {
            let res = client
                .post(format!("{}/servers/{}/probe", base, id))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
