//! Terminal front end for the `MyEpicNFT` mint client.
use clap::{Parser, Subcommand};
use epic_mint_client::{
    render, Config, MintClient, Notice, NoticeSink, RpcWallet,
};
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

type Client = MintClient<RpcWallet, ConsoleNotices>;

/// Mint an NFT from the `MyEpicNFT` collection.
///
/// The wallet is configured through `RPC_URL` and `PRIVATE_KEY`, either in
/// the environment or in a `.env` file. Without them the client runs as if
/// no wallet were installed.
#[derive(Parser, Debug)]
#[command(name = "mint-client", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Show the collection using an already authorized wallet.
    #[default]
    Status,
    /// Connect the wallet and show the collection.
    Connect,
    /// Connect the wallet, mint one NFT and wait for it to show up.
    Mint,
    /// Connect the wallet and re-render on every change until Ctrl-C.
    Watch,
}

/// Prints notices where the user will see them.
struct ConsoleNotices;

impl NoticeSink for ConsoleNotices {
    fn notify(&self, notice: Notice) {
        eprintln!("\n*** {notice}\n");
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().wrap_err("failed to load configuration")?;
    let wallet = RpcWallet::from_config(&config);
    let client = MintClient::new(wallet, config, ConsoleNotices);

    client.init().await;

    match cli.command.unwrap_or_default() {
        Command::Status => {}
        Command::Connect => connect(&client).await?,
        Command::Mint => mint(&client).await?,
        Command::Watch => return watch(&client).await,
    }

    println!("{}", client.view());
    Ok(())
}

async fn connect(client: &Client) -> eyre::Result<()> {
    if !client.session().is_connected() {
        client.connect_wallet().await.wrap_err("failed to connect wallet")?;
    }
    Ok(())
}

async fn mint(client: &Client) -> eyre::Result<()> {
    connect(client).await?;

    let hash = client.mint().await.wrap_err("failed to mint")?;
    println!("Mined, see transaction: {}", Config::tx_link(&hash));

    if client.is_listening().await {
        let mut rx = client.watch();
        tokio::select! {
            minted = rx.wait_for(|session| !session.is_minting) => {
                minted.wrap_err("session closed")?;
            }
            _ = tokio::signal::ctrl_c() => {}
        }
    }
    Ok(())
}

async fn watch(client: &Client) -> eyre::Result<()> {
    connect(client).await?;

    let mut rx = client.watch();
    println!("{}", client.view());
    loop {
        tokio::select! {
            changed = rx.changed() => {
                changed.wrap_err("session closed")?;
                let view = render(&rx.borrow_and_update(), client.config());
                println!("\n{view}");
            }
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
