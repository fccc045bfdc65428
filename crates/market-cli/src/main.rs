//! skill-market: browse and trade listings on the anonymous skill market.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use shared_types::ListingId;
use sm_01_contract_store::ContractStore;
use sm_02_listing_index::{ContactSeal, ListingDraft, ListingMarketApi, MarketError};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use market_cli::config::{parse_address, MarketConfig, StoreKind};
use market_cli::render::{self, WriteAction};
use market_cli::{build_marketplace, build_store, CliMarketplace};

/// Skill Market: anonymous skill listings stored in a key-value contract
#[derive(Parser, Debug)]
#[command(name = "skill-market", version)]
#[command(about = "Browse, submit, book and complete skill listings")]
struct Cli {
    /// Contract store backend: memory, file or rpc [env: SM_STORE]
    #[arg(long, global = true)]
    store: Option<StoreKind>,

    /// JSON-RPC endpoint for the rpc store [env: SM_RPC_URL]
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Key-value contract address [env: SM_CONTRACT_ADDRESS]
    #[arg(long, global = true)]
    contract: Option<String>,

    /// Account used for writes [env: SM_ACCOUNT]
    #[arg(short, long, global = true)]
    account: Option<String>,

    /// Data file for the file store [env: SM_DATA_FILE]
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all listings, newest first
    List {
        /// Case-insensitive filter on skill or status
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Show listing counters
    Stats,
    /// Offer a skill
    Submit {
        #[arg(long)]
        skill: String,
        #[arg(long)]
        hours: f64,
        #[arg(long)]
        rate: f64,
        /// Contact details, stored sealed
        #[arg(long)]
        contact: String,
    },
    /// Book an available listing
    Book { id: String },
    /// Mark a booked listing as completed (owner only)
    Complete { id: String },
    /// Report store availability and the index size
    Status,
    /// Decode a sealed contact value
    Unseal { sealed: String },
    /// Submit, book and complete sample listings, then list them
    Demo,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<MarketConfig> {
    let mut config = MarketConfig::from_env().context("reading SM_* environment")?;

    if let Some(store) = cli.store {
        config.store = store;
    }
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(contract) = &cli.contract {
        config.contract = Some(parse_address("--contract", contract)?);
    }
    if let Some(account) = &cli.account {
        config.account = Some(parse_address("--account", account)?);
    }
    if let Some(path) = &cli.data_file {
        config.data_file = path.clone();
    }

    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

fn write_failure(action: WriteAction, err: MarketError) -> anyhow::Error {
    anyhow!(render::failure_message(action, &err))
}

async fn list(market: &CliMarketplace, search: Option<&str>, json: bool) -> Result<()> {
    let projection = market.load_with_report().await?;
    let shown = market.search(&projection.listings, search.unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", render::listing_cards(&shown));
    }
    eprint!("{}", render::skipped_summary(&projection.skipped));
    Ok(())
}

async fn demo(market: &CliMarketplace) -> Result<()> {
    let seller = market
        .account()
        .ok_or_else(|| anyhow!("demo needs an account (--account or SM_ACCOUNT)"))?;

    let drafts = [
        ListingDraft::new("Rust code review", 6.0, 45.0, "tg:@ferris"),
        ListingDraft::new("Smart contract audit", 20.0, 120.0, "audits@example.org"),
        ListingDraft::new("Technical writing", 10.0, 35.0, "signal:+000"),
    ];
    let mut ids = Vec::new();
    for draft in drafts {
        let listing = market
            .submit_listing(draft)
            .await
            .map_err(|e| write_failure(WriteAction::Submit, e))?;
        ids.push(listing.id);
    }

    market
        .book_listing(&ids[0])
        .await
        .map_err(|e| write_failure(WriteAction::Book, e))?;
    market
        .book_listing(&ids[1])
        .await
        .map_err(|e| write_failure(WriteAction::Book, e))?;
    market
        .complete_listing(&ids[1])
        .await
        .map_err(|e| write_failure(WriteAction::Complete, e))?;

    info!(%seller, "Demo listings written");
    list(market, None, false).await?;
    let listings = market.load_listings().await?;
    print!("\n{}", render::stats_summary(&market.stats(&listings)));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let store = build_store(&config)?;
    let market = build_marketplace(store, &config);

    match cli.command {
        Command::List { search, json } => list(&market, search.as_deref(), json).await?,
        Command::Stats => {
            let listings = market.load_listings().await?;
            print!("{}", render::stats_summary(&market.stats(&listings)));
        }
        Command::Submit {
            skill,
            hours,
            rate,
            contact,
        } => {
            let listing = market
                .submit_listing(ListingDraft::new(skill, hours, rate, contact))
                .await
                .map_err(|e| write_failure(WriteAction::Submit, e))?;
            println!("Listed {}", listing.id);
        }
        Command::Book { id } => {
            let receipt = market
                .book_listing(&ListingId::new(id))
                .await
                .map_err(|e| write_failure(WriteAction::Book, e))?;
            println!("Booked ({})", receipt.tx_hash);
        }
        Command::Complete { id } => {
            let receipt = market
                .complete_listing(&ListingId::new(id))
                .await
                .map_err(|e| write_failure(WriteAction::Complete, e))?;
            println!("Completed ({})", receipt.tx_hash);
        }
        Command::Status => {
            let available = market.index().store().is_available().await?;
            let entries = market.index().read_index().await?.len();
            println!("Store:     {}", config.store);
            println!("Available: {}", available);
            println!("Indexed:   {}", entries);
            match market.account() {
                Some(account) => println!("Account:   {}", account),
                None => println!("Account:   not connected"),
            }
        }
        Command::Unseal { sealed } => {
            let draft = ContactSeal::open(&sealed)?;
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Command::Demo => demo(&market).await?,
    }

    Ok(())
}
