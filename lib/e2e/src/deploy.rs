use alloy::{
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, TxHash},
    providers::{PendingTransactionError, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    sol_types::SolConstructor,
    transports::TransportError,
};
use tracing::{debug, info};

use crate::{artifact::ContractFactory, system::Wallet};

/// Errors raised while deploying a contract.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The node rejected the deployment transaction, e.g. because the
    /// constructor reverted during gas estimation.
    #[error("failed to send deployment transaction")]
    Transport(#[from] TransportError),
    /// The transaction was sent but its receipt never arrived.
    #[error("failed to confirm deployment transaction")]
    Pending(#[from] PendingTransactionError),
    /// The deployment transaction was mined but failed.
    #[error("deployment of `{contract}` reverted in transaction {tx_hash}")]
    Reverted {
        /// Contract name.
        contract: String,
        /// Hash of the failed transaction.
        tx_hash: TxHash,
    },
    /// The receipt doesn't report a created contract.
    #[error("transaction {tx_hash} didn't create `{contract}`")]
    MissingContractAddress {
        /// Contract name.
        contract: String,
        /// Hash of the deployment transaction.
        tx_hash: TxHash,
    },
}

/// A confirmed contract deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Address of the created contract.
    pub address: Address,
    /// Hash of the deployment transaction.
    pub tx_hash: TxHash,
    /// Receipt of the deployment transaction.
    pub receipt: TransactionReceipt,
}

/// A basic smart contract deployer.
#[derive(Clone)]
pub struct Deployer {
    wallet: Wallet,
    constructor_args: Vec<u8>,
    confirmations: u64,
}

impl Deployer {
    /// Create a deployer sending transactions through `wallet`. Waits for a
    /// single confirmation by default.
    #[must_use]
    pub fn new(wallet: Wallet) -> Self {
        Self { wallet, constructor_args: Vec::new(), confirmations: 1 }
    }

    /// Add solidity constructor arguments to the deployer.
    #[must_use]
    pub fn with_constructor<C: SolConstructor>(mut self, ctor: &C) -> Self {
        self.constructor_args = ctor.abi_encode();
        self
    }

    /// Number of confirmations to wait for before the deployment counts as
    /// done.
    #[must_use]
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// The wallet deployments are sent from.
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Deploy a new instance of the contract `factory` creates.
    /// Consumes currently configured deployer.
    ///
    /// # Errors
    ///
    /// May error if:
    ///
    /// - The node rejects the transaction (the constructor's revert reason is
    ///   kept in [`DeployError::Transport`]).
    /// - The receipt can't be fetched.
    /// - The transaction failed or created no contract.
    pub async fn deploy(
        self,
        factory: &ContractFactory,
    ) -> Result<Deployment, DeployError> {
        let contract = factory.name().to_string();
        let tx = TransactionRequest::default()
            .with_deploy_code(factory.deploy_code(&self.constructor_args));

        debug!(%contract, "sending deployment transaction");
        let pending = self.wallet.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(
            %contract,
            %tx_hash,
            confirmations = self.confirmations,
            "waiting for deployment"
        );

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;

        let deployment = Deployment::from_receipt(&contract, receipt)?;
        info!(
            %contract,
            address = %deployment.address,
            %tx_hash,
            "contract deployed"
        );
        Ok(deployment)
    }
}

impl Deployment {
    /// Checks that `receipt` reports a successful creation of `contract`.
    fn from_receipt(
        contract: &str,
        receipt: TransactionReceipt,
    ) -> Result<Self, DeployError> {
        let tx_hash = receipt.transaction_hash();
        let contract = contract.to_string();

        if !receipt.status() {
            return Err(DeployError::Reverted { contract, tx_hash });
        }

        let Some(address) = receipt.contract_address() else {
            return Err(DeployError::MissingContractAddress {
                contract,
                tx_hash,
            });
        };

        Ok(Self { address, tx_hash, receipt })
    }
}
