use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wallet_connector::{
    render, render_detailed, render_provider_choice, Config, ProviderChoice, Session,
};

#[derive(Parser, Debug)]
#[command(name = "wallet-connector")]
#[command(about = "Connect to an Ethereum wallet and show its ETH and token balances", long_about = None)]
struct Args {
    /// Provider to connect through (injected, remote)
    #[arg(short, long, default_value_t = ProviderChoice::Injected)]
    provider: ProviderChoice,

    /// Wallet JSON-RPC endpoint, overrides WALLET_PROVIDER_URL
    #[arg(long)]
    wallet_url: Option<String>,

    /// Remote endpoint identifier, overrides REMOTE_PROJECT_ID
    #[arg(long)]
    project_id: Option<String>,

    /// Print the balance snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wallet_connector=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = args.wallet_url {
        config.injected.url = Some(url);
    }
    if let Some(id) = args.project_id {
        config.remote.project_id = id;
    }

    let mut session = Session::new(args.provider);
    println!("{}", render_provider_choice(session.choice()));

    match session.connect(&config, |state| println!("{}", render(state))).await {
        Ok(snapshot) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("\n{}", render_detailed(&snapshot));
            }
        }
        Err(_) => std::process::exit(1),
    }

    Ok(())
}
