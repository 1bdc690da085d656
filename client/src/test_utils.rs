//! Unit-testing utilities: in-memory wallet, contract and notice sink.
use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use alloy::{
    primitives::{Address, TxHash, B256},
    transports::TransportErrorKind,
};
use futures::{channel::mpsc, StreamExt};
use tokio::sync::Notify;

use crate::{
    contract::{MintContract, MintEvents, PendingMint},
    Error, MintEvent, Notice, NoticeSink, WalletProvider,
};

fn rpc_failure(message: &'static str) -> Error {
    Error::Transport(TransportErrorKind::custom_str(message))
}

/// Notice sink that keeps everything it is given.
#[derive(Clone, Default)]
pub(crate) struct RecordingNotices(Arc<Mutex<Vec<Notice>>>);

impl RecordingNotices {
    /// Drain the recorded notices.
    pub(crate) fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

#[derive(Default)]
struct ContractState {
    count: AtomicU64,
    mint_calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_submissions: AtomicBool,
    fail_confirmations: AtomicBool,
    hold_confirmations: AtomicBool,
    confirmations: Notify,
    listeners: Mutex<Vec<mpsc::UnboundedSender<Result<MintEvent, Error>>>>,
}

/// In-memory [`MintContract`]. Clones share state.
#[derive(Clone, Default)]
pub(crate) struct MockContract(Arc<ContractState>);

impl MockContract {
    pub(crate) fn set_count(&self, count: u64) {
        self.0.count.store(count, Ordering::SeqCst);
    }

    pub(crate) fn mint_calls(&self) -> usize {
        self.0.mint_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_reads(&self) {
        self.0.fail_reads.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_submissions(&self) {
        self.0.fail_submissions.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_confirmations(&self) {
        self.0.fail_confirmations.store(true, Ordering::SeqCst);
    }

    /// Keep pending mints unconfirmed until [`MockContract::confirm`].
    pub(crate) fn hold_confirmations(&self) {
        self.0.hold_confirmations.store(true, Ordering::SeqCst);
    }

    /// Confirm one held mint.
    pub(crate) fn confirm(&self) {
        self.0.confirmations.notify_one();
    }

    /// Deliver `event` to every registered listener.
    pub(crate) fn emit(&self, event: MintEvent) {
        let listeners = self.0.listeners.lock().unwrap();
        for listener in listeners.iter() {
            let _ = listener.unbounded_send(Ok(event));
        }
    }

    /// Number of listeners whose stream is still alive.
    pub(crate) fn listeners(&self) -> usize {
        let listeners = self.0.listeners.lock().unwrap();
        listeners.iter().filter(|listener| !listener.is_closed()).count()
    }

    /// Wait until exactly `expected` listeners are alive.
    pub(crate) async fn wait_for_listeners(&self, expected: usize) {
        let settled = tokio::time::timeout(Duration::from_secs(5), async {
            while self.listeners() != expected {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await;
        assert!(
            settled.is_ok(),
            "expected {expected} listeners, found {}",
            self.listeners()
        );
    }
}

impl MintContract for MockContract {
    type Pending = MockPending;

    async fn current_count(&self) -> Result<u64, Error> {
        if self.0.fail_reads.load(Ordering::SeqCst) {
            return Err(rpc_failure("getCurrentNFTCount failed"));
        }
        Ok(self.0.count.load(Ordering::SeqCst))
    }

    async fn make_an_epic_nft(&self) -> Result<MockPending, Error> {
        if self.0.fail_submissions.load(Ordering::SeqCst) {
            return Err(rpc_failure("insufficient funds for gas"));
        }
        let calls = self.0.mint_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let hash = B256::left_padding_from(&calls.to_be_bytes());
        Ok(MockPending { hash, state: Arc::clone(&self.0) })
    }

    async fn minted_events(&self) -> Result<MintEvents, Error> {
        let (tx, rx) = mpsc::unbounded();
        self.0.listeners.lock().unwrap().push(tx);
        Ok(rx.boxed())
    }
}

/// Pending mint of a [`MockContract`].
pub(crate) struct MockPending {
    hash: TxHash,
    state: Arc<ContractState>,
}

impl PendingMint for MockPending {
    fn hash(&self) -> TxHash {
        self.hash
    }

    async fn wait(self) -> Result<TxHash, Error> {
        if self.state.hold_confirmations.load(Ordering::SeqCst) {
            self.state.confirmations.notified().await;
        }
        if self.state.fail_confirmations.load(Ordering::SeqCst) {
            return Err(Error::Reverted(self.hash));
        }
        Ok(self.hash)
    }
}

/// In-memory [`WalletProvider`] handing out a shared [`MockContract`].
#[derive(Clone)]
pub(crate) struct MockWallet {
    authorized: Vec<Address>,
    granted: Option<Vec<Address>>,
    chain_id: u64,
    fail_signers: Arc<AtomicBool>,
    pub(crate) contract: MockContract,
}

impl MockWallet {
    /// A wallet on Rinkeby that already authorized `authorized`, and grants
    /// the same accounts on request.
    pub(crate) fn new(authorized: Vec<Address>) -> Self {
        Self {
            granted: Some(authorized.clone()),
            authorized,
            chain_id: 4,
            fail_signers: Arc::default(),
            contract: MockContract::default(),
        }
    }

    pub(crate) fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Grant `accounts` when the user is asked.
    pub(crate) fn granting(mut self, accounts: Vec<Address>) -> Self {
        self.granted = Some(accounts);
        self
    }

    /// Reject every account request.
    pub(crate) fn rejecting(mut self) -> Self {
        self.granted = None;
        self
    }

    pub(crate) fn fail_signers(&self) {
        self.fail_signers.store(true, Ordering::SeqCst);
    }
}

impl WalletProvider for MockWallet {
    type Contract = MockContract;

    async fn accounts(&self) -> Result<Vec<Address>, Error> {
        Ok(self.authorized.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        self.granted.clone().ok_or_else(|| {
            Error::AuthorizationRejected("User rejected the request.".into())
        })
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        Ok(self.chain_id)
    }

    async fn connect(
        &self,
        _account: Address,
        _contract: Address,
    ) -> Result<MockContract, Error> {
        if self.fail_signers.load(Ordering::SeqCst) {
            return Err(rpc_failure("signer unavailable"));
        }
        Ok(self.contract.clone())
    }
}
