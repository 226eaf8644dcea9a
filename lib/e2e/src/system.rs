use alloy::{
    network::EthereumWallet,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};

/// Convenience type alias that represents an Ethereum wallet: an `alloy`
/// provider with the recommended fillers and a `WalletFiller`.
pub type Wallet = DynProvider;

/// Build a [`Wallet`] that signs with `signer` and talks to `rpc_url`.
#[must_use]
pub fn wallet(rpc_url: Url, signer: PrivateKeySigner) -> Wallet {
    ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url)
        .erased()
}
