use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txops_config::ConfigLoader;

mod commands;

#[derive(Parser)]
#[command(name = "txops")]
#[command(about = "Chain RPC task runner", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[arg(short, long, value_name = "FILE", default_value = "config/local.toml")]
	config: PathBuf,

	#[arg(long, env = "TXOPS_LOG_LEVEL", default_value = "info")]
	log_level: String,
}

#[derive(Subcommand)]
enum Commands {
	/// Query the native balance of an address
	Balance { address: String },
	/// Query an ERC-20 token's name and holder balances
	TokenInfo {
		/// Token contract address (defaults to the configured token)
		#[arg(long)]
		token: Option<String>,
		/// Holder addresses to query
		holders: Vec<String>,
	},
	/// Inspect a block by number
	Block {
		number: u64,
		/// Also show details and receipt for this transaction hash
		#[arg(long)]
		tx: Option<String>,
	},
	/// Look up the receipt of a submitted transaction
	Receipt { hash: String },
	/// Send a native transfer and wait for confirmation
	Transfer { to: String, amount_eth: String },
	/// Send an ERC-20 transfer and wait for confirmation
	TransferToken {
		to: String,
		amount: u64,
		#[arg(long)]
		token: Option<String>,
	},
	/// Query a Solana account balance
	SolBalance { address: String },
	/// Wait for a Solana transaction signature to finalize
	SolStatus { signature: String },
	/// Validate the configuration file
	Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	setup_tracing(&cli.log_level)?;

	let config = ConfigLoader::new()
		.with_file(&cli.config)
		.load()
		.await
		.context("Failed to load configuration")?;

	match cli.command {
		Commands::Balance { address } => commands::query::balance(&config, &address).await,
		Commands::TokenInfo { token, holders } => {
			commands::query::token_info(&config, token.as_deref(), &holders).await
		}
		Commands::Block { number, tx } => {
			commands::query::block(&config, number, tx.as_deref()).await
		}
		Commands::Receipt { hash } => commands::query::receipt(&config, &hash).await,
		Commands::Transfer { to, amount_eth } => {
			commands::transfer::native(&config, &to, &amount_eth).await
		}
		Commands::TransferToken { to, amount, token } => {
			commands::transfer::token(&config, token.as_deref(), &to, amount).await
		}
		Commands::SolBalance { address } => commands::solana::balance(&config, &address).await,
		Commands::SolStatus { signature } => {
			commands::solana::status(&config, &signature).await
		}
		Commands::Validate => {
			info!("Configuration is valid");
			info!("EVM RPC: {}", config.evm.rpc_url);
			info!("EVM chain ID: {}", config.evm.chain_id);
			info!("Solana RPC: {}", config.solana.rpc_url);
			info!(
				"Confirmation: timeout {}s, interval {}s",
				config.confirmation.timeout_secs, config.confirmation.poll_interval_secs
			);
			Ok(())
		}
	}
}

fn setup_tracing(log_level: &str) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer())
		.init();

	Ok(())
}
