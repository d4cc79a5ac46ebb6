use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "ticket-cli")]
#[command(about = "Command line client for the ticket service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every ticket
    List,
    /// Show a single ticket
    Show { id: i64 },
    /// Change a ticket's status and/or priority
    Update {
        id: i64,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    /// Print the precomputed metrics document
    Metrics,
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::List => client.get(format!("{}/tickets", base)).send().await?,
        Commands::Show { id } => client.get(format!("{}/tickets/{}", base, id)).send().await?,
        Commands::Update {
            id,
            status,
            priority,
        } => {
            let mut body = json!({});
            if let Some(status) = status {
                body["status"] = Value::String(status);
            }
            if let Some(priority) = priority {
                body["priority"] = Value::String(priority);
            }
            client
                .patch(format!("{}/tickets/{}", base, id))
                .json(&body)
                .send()
                .await?
        }
        Commands::Metrics => client.get(format!("{}/metrics", base)).send().await?,
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
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
