//! End-to-end deployment and testing harness for EVM contracts.
//!
//! Contracts are looked up by name among compiled artifacts
//! ([`ContractFactory`]), deployed through a [`Deployer`] on behalf of an
//! [`Account`], and the resulting errors can be matched against revert
//! reasons with [`RevertExt`].
mod account;
mod address;
mod artifact;
mod deploy;
mod environment;
mod error;
mod system;

pub use account::Account;
pub use address::{is_proper_address, parse_address, AddressError};
pub use artifact::{ArtifactError, ContractFactory};
pub use deploy::{DeployError, Deployer, Deployment};
pub use e2e_proc::test;
pub use environment::{
    artifacts_dir, rpc_url, ARTIFACTS_DIR_ENV_VAR_NAME, DEFAULT_RPC_URL,
    RPC_URL_ENV_VAR_NAME,
};
pub use error::RevertExt;
pub use system::{wallet, Wallet};
