#![cfg(feature = "e2e")]

use alloy::{network::ReceiptResponse, primitives::U256, providers::Provider};
use e2e::{
    artifacts_dir, is_proper_address, Account, ContractFactory, RevertExt,
};
use eyre::Result;
use uv3_position_manager::{
    constructor_address_from_env, PositionManager, CONTRACT_NAME,
    INVALID_PRICE_REASON, MAX_TICK, MIN_TICK,
};

async fn deploy(account: &Account) -> Result<PositionManager> {
    let position_manager = constructor_address_from_env()?;
    let factory =
        ContractFactory::from_artifacts(artifacts_dir()?, CONTRACT_NAME)?;
    let deployer = account.as_deployer();
    let contract =
        PositionManager::deploy(deployer, &factory, position_manager).await?;
    Ok(contract)
}

// ============================================================================
// Integration Tests: UniswapV3PositionManager
// ============================================================================

#[e2e::test]
async fn constructs(alice: Account) -> Result<()> {
    let contract = deploy(&alice).await?;

    let deployment = contract.deployment();
    assert!(deployment.receipt.status());
    assert_eq!(deployment.receipt.from, alice.address());

    let address = contract.address().to_checksum(None);
    assert!(is_proper_address(&address), "improper address {address}");

    let code = alice.wallet.get_code_at(contract.address()).await?;
    assert!(!code.is_empty());

    Ok(())
}

#[e2e::test]
async fn calculates_tick_from_price(alice: Account) -> Result<()> {
    let contract = deploy(&alice).await?;

    let tick = contract.tick_from_price(U256::from(100_000)).await?;
    assert!((MIN_TICK..=MAX_TICK).contains(&tick), "tick {tick} out of range");

    Ok(())
}

#[e2e::test]
async fn rejects_zero_price(alice: Account) -> Result<()> {
    let contract = deploy(&alice).await?;

    let err = contract
        .tick_from_price(U256::ZERO)
        .await
        .expect_err("should not compute a tick for a zero price");
    assert!(
        err.reverted_with(INVALID_PRICE_REASON),
        "unexpected error: {err:#?}"
    );

    Ok(())
}
