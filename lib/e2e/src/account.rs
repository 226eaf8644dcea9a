use std::fmt;

use alloy::{
    network::TransactionBuilder,
    primitives::{uint, Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::Context;
use once_cell::sync::Lazy;
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::{
    deploy::Deployer,
    environment::{env, rpc_url},
    system::{wallet, Wallet},
};

/// Name of the environment variable that overrides [`MASTER_PRIVATE_KEY`].
const MASTER_PRIVATE_KEY_ENV_VAR_NAME: &str = "E2E_MASTER_PRIVATE_KEY";

/// First prefunded account of both Anvil and the Hardhat node.
const MASTER_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a91b4d1edc4f6ec70ba6ecaa7f43e5fee3a89e10ebed";

const DEFAULT_FUNDING_ETH: U256 = uint!(10_000_000_000_000_000_000_U256);

/// Type that corresponds to a test account.
#[derive(Clone)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
    /// The account's wallet -- an `alloy` provider with a `WalletFiller`.
    pub wallet: Wallet,
    url: Url,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address())
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl Account {
    /// Create a new account with a default funding of
    /// [`DEFAULT_FUNDING_ETH`].
    ///
    /// # Errors
    ///
    /// May fail if funding the newly created account fails.
    pub async fn new() -> eyre::Result<Self> {
        AccountFactory::create().await
    }

    /// Wrap an existing key, e.g. the deployer's, without funding it.
    #[must_use]
    pub fn from_signer(signer: PrivateKeySigner, url: Url) -> Self {
        let wallet = wallet(url.clone(), signer.clone());
        Self { signer, wallet, url }
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The rpc endpoint this account's provider is connected to.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Create a configurable smart contract deployer on behalf of this account.
    #[must_use]
    pub fn as_deployer(&self) -> Deployer {
        Deployer::new(self.wallet.clone())
    }
}

/// A unit struct used as a synchronization mechanism in
/// [`SYNC_ACCOUNT_FACTORY`].
struct AccountFactory;

impl AccountFactory {
    /// Get access to the factory in a synchronized manner.
    async fn lock() -> MutexGuard<'static, Self> {
        /// Since after wallet generation accounts get funded from a single
        /// master wallet, we must synchronize account creation (otherwise the
        /// nonce will be too low).
        static SYNC_ACCOUNT_FACTORY: Lazy<Mutex<AccountFactory>> =
            Lazy::new(|| Mutex::new(AccountFactory));

        SYNC_ACCOUNT_FACTORY.lock().await
    }

    /// Create new account and fund it from the master account.
    ///
    /// # Errors
    ///
    /// May fail if the node can't be reached or if funding the newly created
    /// account fails.
    async fn create() -> eyre::Result<Account> {
        let _lock = AccountFactory::lock().await;

        let rpc_url = rpc_url()?;
        let master = get_master_signer()?;
        let master_wallet = wallet(rpc_url.clone(), master.clone());

        let signer = PrivateKeySigner::random();
        let account_address = signer.address();

        let tx = TransactionRequest::default()
            .with_from(master.address())
            .with_to(account_address)
            .with_value(DEFAULT_FUNDING_ETH);

        master_wallet
            .send_transaction(tx)
            .await?
            .watch()
            .await
            .wrap_err(format!(
                "account's wallet wasn't funded - address is {account_address}"
            ))?;
        debug!(%account_address, "funded test account");

        Ok(Account::from_signer(signer, rpc_url))
    }
}

/// Get Master signer for the chain.
fn get_master_signer() -> eyre::Result<PrivateKeySigner> {
    let key = env(MASTER_PRIVATE_KEY_ENV_VAR_NAME)
        .unwrap_or_else(|_| MASTER_PRIVATE_KEY.to_string());
    key.parse().wrap_err("failed to create master signer")
}
