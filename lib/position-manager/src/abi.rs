//! Solidity interface of the `UniswapV3PositionManager` contract.
#![allow(missing_docs)]
use alloy::sol;

sol!(
    #[sol(rpc)]
    contract UniswapV3PositionManager {
        constructor(address positionManager);

        function getTickFromPrice(uint256 price)
            external
            view
            returns (int24 tick);
    }
);

#[cfg(test)]
mod tests {
    use alloy::{
        primitives::{address, keccak256},
        sol_types::{SolCall, SolConstructor},
    };

    use super::UniswapV3PositionManager::{
        constructorCall, getTickFromPriceCall,
    };

    #[test]
    fn constructor_takes_a_single_address() {
        let position_manager =
            address!("C36442b4a4522E871399CD717aBDD847Ab11FE88");
        let encoded =
            constructorCall { positionManager: position_manager }.abi_encode();

        assert_eq!(encoded.len(), 32);
        assert!(encoded[..12].iter().all(|b| *b == 0));
        assert_eq!(&encoded[12..], position_manager.as_slice());
    }

    #[test]
    fn tick_from_price_matches_contract_selector() {
        let signature = "getTickFromPrice(uint256)";
        assert_eq!(getTickFromPriceCall::SIGNATURE, signature);

        let hash = keccak256(signature);
        assert_eq!(&getTickFromPriceCall::SELECTOR[..], &hash[..4]);
    }
}
