//! The mint client: wallet connection, mint submission and count sync.
use std::sync::Arc;

use alloy::primitives::{Address, TxHash};
use futures::StreamExt;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{
    contract::{MintContract, MintEvent, MintEvents, PendingMint},
    network::NetworkCheck,
    notice::LogNotices,
    render, Config, Error, Notice, NoticeSink, Session, View, WalletProvider,
};

/// Owns the listener for `NewEpicNFTMinted` events.
///
/// The listener stops when this is dropped.
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    /// Whether the listener is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Connects a wallet, mints, and keeps a [`Session`] in sync with the
/// contract.
///
/// Every state change goes through one `watch` channel. Use
/// [`MintClient::watch`] to re-render on change.
pub struct MintClient<W, N = LogNotices> {
    wallet: Option<W>,
    config: Config,
    notices: Arc<N>,
    state: Arc<watch::Sender<Session>>,
    subscription: Mutex<Option<Subscription>>,
}

impl<W, N> MintClient<W, N>
where
    W: WalletProvider,
    N: NoticeSink,
{
    /// Create a client. `wallet` is `None` when no wallet provider exists.
    pub fn new(wallet: Option<W>, config: Config, notices: N) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            wallet,
            config,
            notices: Arc::new(notices),
            state: Arc::new(state),
            subscription: Mutex::new(None),
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Render the current session.
    #[must_use]
    pub fn view(&self) -> View {
        render(&self.state.borrow(), &self.config)
    }

    /// Configuration the client runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a mint event listener is running.
    pub async fn is_listening(&self) -> bool {
        let subscription = self.subscription.lock().await;
        subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Page-load check: validate the network and pick up an account the
    /// wallet already authorized, without prompting the user.
    pub async fn init(&self) {
        let Some(wallet) = &self.wallet else {
            warn!("no wallet provider found");
            return;
        };
        debug!("wallet provider found");

        self.check_network(wallet).await;

        match wallet.accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(&account) => {
                    info!(%account, "found an authorized account");
                    self.adopt(wallet, account).await;
                }
                None => info!("no authorized account found"),
            },
            Err(e) => error!(error = %e, "failed to read authorized accounts"),
        }
    }

    /// Compare the wallet's chain with the required one. A mismatch raises
    /// a notice and nothing else.
    async fn check_network(&self, wallet: &W) {
        let chain_id = match wallet.chain_id().await {
            Ok(chain_id) => chain_id,
            Err(e) => {
                error!(error = %e, "failed to read chain id");
                return;
            }
        };

        match NetworkCheck::new(self.config.required_chain_id, chain_id) {
            NetworkCheck::Supported => debug!(chain_id, "network supported"),
            NetworkCheck::Unsupported { required, detected } => {
                warn!(%required, %detected, "unsupported network");
                self.notices.notify(Notice::WrongNetwork { required, detected });
            }
        }
    }

    /// Ask the wallet for an account and start tracking the minted count.
    ///
    /// # Errors
    ///
    /// May fail if there is no wallet or the user rejects the request. The
    /// session stays disconnected in both cases.
    pub async fn connect_wallet(&self) -> Result<Address, Error> {
        let Some(wallet) = &self.wallet else {
            self.notices.notify(Notice::WalletAbsent);
            return Err(Error::WalletAbsent);
        };

        let accounts = wallet.request_accounts().await.inspect_err(|e| {
            error!(error = %e, "wallet connection failed");
        })?;
        let Some(&account) = accounts.first() else {
            error!("wallet returned no accounts");
            return Err(Error::AuthorizationRejected(
                "no accounts returned".to_owned(),
            ));
        };

        info!(%account, "connected");
        self.adopt(wallet, account).await;
        Ok(account)
    }

    /// Forget the connected account and stop listening for mint events.
    pub async fn disconnect(&self) {
        self.subscription.lock().await.take();
        self.state.send_modify(|session| {
            session.connected_account = None;
            session.is_minting = false;
        });
        info!("disconnected");
    }

    /// Make `account` the connected one and (re)start the listener.
    async fn adopt(&self, wallet: &W, account: Address) {
        let mut slot = self.subscription.lock().await;
        slot.take();
        self.state.send_modify(|session| {
            session.connected_account = Some(account);
        });

        match self.listen(wallet, account).await {
            Ok(subscription) => {
                info!("set up event listener");
                *slot = Some(subscription);
            }
            Err(e) => error!(error = %e, "failed to set up event listener"),
        }
    }

    /// Read the count once, then register the listener. The snapshot is
    /// taken before registration, so an event racing with it may be applied
    /// twice but is never lost.
    async fn listen(
        &self,
        wallet: &W,
        account: Address,
    ) -> Result<Subscription, Error> {
        let contract =
            wallet.connect(account, self.config.contract_address).await?;

        let count = contract.current_count().await?;
        debug!(count, "read current minted count");
        self.state.send_modify(|session| session.minted_count = count);

        let events = contract.minted_events().await?;
        let task = tokio::spawn(apply_events(
            events,
            Arc::clone(&self.state),
            Arc::clone(&self.notices),
            self.config.clone(),
        ));
        Ok(Subscription { task })
    }

    /// Mint one token for the connected account.
    ///
    /// Returns the hash of the confirmed transaction. The minted count is
    /// updated by the event listener, not here.
    ///
    /// # Errors
    ///
    /// May fail if there is no wallet or account, the supply cap is
    /// reached, or signing, submission or confirmation fails. Minting is
    /// marked as finished on every failure.
    pub async fn mint(&self) -> Result<TxHash, Error> {
        let Some(wallet) = &self.wallet else {
            warn!("no wallet provider found");
            return Err(Error::WalletAbsent);
        };

        let (account, count) = {
            let session = self.state.borrow();
            (session.connected_account, session.minted_count)
        };
        let account = account.ok_or(Error::NotConnected)?;

        let cap = self.config.total_mint_count;
        if count >= cap {
            info!(count, cap, "max number of NFTs are minted");
            self.notices.notify(Notice::MaxMinted { count, cap });
            return Err(Error::SupplyCapReached { count, cap });
        }

        let result = self.submit(wallet, account).await;
        if let Err(e) = &result {
            error!(error = %e, "mint failed");
            self.state.send_modify(|session| session.is_minting = false);
        }
        result
    }

    async fn submit(
        &self,
        wallet: &W,
        account: Address,
    ) -> Result<TxHash, Error> {
        let contract =
            wallet.connect(account, self.config.contract_address).await?;

        info!("going to pop wallet now to pay gas");
        let pending = contract.make_an_epic_nft().await?;
        // The listener runs on its own task. If the node mines instantly, the
        // mint event may be applied before this line and `is_minting` stays
        // set until the next event.
        self.state.send_modify(|session| session.is_minting = true);

        info!(hash = %pending.hash(), "mining, please wait");
        let hash = pending.wait().await?;
        info!(link = %Config::tx_link(&hash), "mined");
        Ok(hash)
    }
}

/// Apply every delivered mint event to the session until the stream ends.
async fn apply_events<N: NoticeSink>(
    mut events: MintEvents,
    state: Arc<watch::Sender<Session>>,
    notices: Arc<N>,
    config: Config,
) {
    while let Some(event) = events.next().await {
        let MintEvent { sender, token_id } = match event {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "skipping mint event");
                continue;
            }
        };

        info!(%sender, token_id, "NFT minted");
        state.send_modify(|session| {
            session.minted_count = token_id;
            session.is_minting = false;
        });

        let link = config.asset_link(token_id);
        notices.notify(Notice::Minted { token_id, link });
    }
    debug!("mint event stream ended");
}
