use alloy::primitives::{Address, U256};
use e2e::{ContractFactory, DeployError, Deployer, Deployment, Wallet};
use tracing::info;

use crate::abi::UniswapV3PositionManager::{
    self, UniswapV3PositionManagerInstance,
};

/// A deployed `UniswapV3PositionManager`.
pub struct PositionManager {
    deployment: Deployment,
    contract: UniswapV3PositionManagerInstance<Wallet>,
}

impl PositionManager {
    /// Deploys a new instance created by `factory`, passing `position_manager`
    /// as the sole constructor argument, and waits for it to be confirmed.
    ///
    /// # Errors
    ///
    /// See [`Deployer::deploy`].
    pub async fn deploy(
        deployer: Deployer,
        factory: &ContractFactory,
        position_manager: Address,
    ) -> Result<Self, DeployError> {
        info!(%position_manager, "deploying {}", factory.name());

        let wallet = deployer.wallet().clone();
        let ctor = UniswapV3PositionManager::constructorCall {
            positionManager: position_manager,
        };
        let deployment =
            deployer.with_constructor(&ctor).deploy(factory).await?;
        let contract =
            UniswapV3PositionManager::new(deployment.address, wallet);

        Ok(Self { deployment, contract })
    }

    /// Address of the deployed contract.
    #[must_use]
    pub fn address(&self) -> Address {
        self.deployment.address
    }

    /// The confirmed deployment.
    #[must_use]
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Calls `getTickFromPrice(price)`.
    ///
    /// # Errors
    ///
    /// May fail if the call reverts, e.g. for a zero price.
    pub async fn tick_from_price(
        &self,
        price: U256,
    ) -> Result<i32, alloy::contract::Error> {
        let tick = self.contract.getTickFromPrice(price).call().await?;
        Ok(tick.as_i32())
    }
}
