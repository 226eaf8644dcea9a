//! Bindings and deployment for the `UniswapV3PositionManager` contract.
//!
//! The contract is deployed with the address of a Uniswap V3 position
//! manager, read from [`ADDRESS_ENV_VAR_NAME`], as its only constructor
//! argument. See [`PositionManager::deploy`].
pub mod abi;
mod config;
mod position_manager;

pub use config::{
    constructor_address, constructor_address_from_env, ConfigError,
    ADDRESS_ENV_VAR_NAME,
};
pub use position_manager::PositionManager;

/// Name of the contract, as found in compiled artifacts.
pub const CONTRACT_NAME: &str = "UniswapV3PositionManager";

/// Reason `getTickFromPrice` reverts with for a zero price.
pub const INVALID_PRICE_REASON: &str = "Price must be greater than zero";

/// Smallest tick a Uniswap V3 pool can represent.
pub const MIN_TICK: i32 = -887_272;

/// Largest tick a Uniswap V3 pool can represent.
pub const MAX_TICK: i32 = -MIN_TICK;
