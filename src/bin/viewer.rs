//! equity-viewer - browse stored equity research reports from a terminal.

use clap::{Parser, Subcommand};
use console::style;
use equity_analyst::viewer::client::DEFAULT_BACKEND_URL;
use equity_analyst::viewer::render::{
    self, FETCH_SUMMARIES_ERROR, NO_COMPANIES_WARNING, NO_SUMMARIES_WARNING,
};
use equity_analyst::viewer::ViewerClient;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "equity-viewer")]
#[command(about = "Browse AI-generated equity research reports")]
#[command(version)]
struct Cli {
    /// Base URL of the report service
    #[arg(long, env = "EQUITY_VIEWER_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List companies with stored reports
    Companies,

    /// Print the stored reports for a company
    Show {
        /// Company name, exactly as uploaded
        company: String,
        /// Only show this quarter
        #[arg(short, long)]
        quarter: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let client = ViewerClient::new(&cli.backend_url)?;

    match cli.command {
        Some(Commands::Companies) => cmd_companies(&client).await,
        Some(Commands::Show { company, quarter }) => {
            cmd_show(&client, &company, quarter.as_deref()).await
        }
        None => cmd_interactive(&client).await?,
    }

    Ok(())
}

fn warn(message: &str) {
    println!("{} {}", style("!").yellow(), style(message).yellow());
}

fn error(message: &str) {
    println!("{} {}", style("✗").red(), style(message).red());
}

/// Companies, or `None` after printing why there are none to show
async fn fetch_companies(client: &ViewerClient) -> Option<Vec<String>> {
    let companies = match client.list_companies().await {
        Ok(companies) => companies,
        Err(e) => {
            tracing::debug!("Listing companies failed: {}", e);
            // An unreachable backend looks the same as an empty one
            Vec::new()
        }
    };

    if companies.is_empty() {
        warn(NO_COMPANIES_WARNING);
        return None;
    }
    Some(companies)
}

async fn cmd_companies(client: &ViewerClient) {
    if let Some(companies) = fetch_companies(client).await {
        for name in companies {
            println!("{}", name);
        }
    }
}

async fn cmd_show(client: &ViewerClient, company: &str, quarter: Option<&str>) {
    match client.fetch_summary(company, quarter).await {
        Ok(Some(summary)) if !summary.summaries.is_empty() => {
            println!("{}", render::summary(&summary));
        }
        Ok(_) => warn(NO_SUMMARIES_WARNING),
        Err(e) => {
            tracing::debug!("Fetching summary for {} failed: {}", company, e);
            error(FETCH_SUMMARIES_ERROR);
        }
    }
}

async fn cmd_interactive(client: &ViewerClient) -> anyhow::Result<()> {
    let Some(companies) = fetch_companies(client).await else {
        return Ok(());
    };

    println!("{}", style("Select a company").bold());
    println!("{}", render::company_menu(&companies));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style(">").cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        match render::parse_selection(&line, companies.len()) {
            Some(index) => {
                cmd_show(client, &companies[index], None).await;
                return Ok(());
            }
            None => warn(&format!("Enter a number between 1 and {}", companies.len())),
        }
    }
}
