use alloy::primitives::Address;
use e2e::{parse_address, AddressError};

/// Name of the environment variable holding the constructor address.
pub const ADDRESS_ENV_VAR_NAME: &str = "UV3_PM_ADDRESS";

/// Errors raised while reading the deployment configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No constructor address was provided.
    #[error("UV3_PM_ADDRESS is not set")]
    MissingAddress,
    /// The constructor address is not a proper address.
    #[error("invalid UV3_PM_ADDRESS")]
    InvalidAddress(#[source] AddressError),
}

/// Validates the constructor address before any transaction is built.
///
/// # Errors
///
/// May fail if `value` is absent, blank or not a proper address.
pub fn constructor_address(
    value: Option<&str>,
) -> Result<Address, ConfigError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty());
    let value = value.ok_or(ConfigError::MissingAddress)?;
    parse_address(value).map_err(ConfigError::InvalidAddress)
}

/// Reads and validates the constructor address from
/// [`ADDRESS_ENV_VAR_NAME`].
///
/// # Errors
///
/// See [`constructor_address`].
pub fn constructor_address_from_env() -> Result<Address, ConfigError> {
    let value = std::env::var(ADDRESS_ENV_VAR_NAME).ok();
    constructor_address(value.as_deref())
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn parses_configured_address() {
        let parsed = constructor_address(Some(
            " 0xC36442b4a4522E871399CD717aBDD847Ab11FE88\n",
        ));
        assert_eq!(
            parsed,
            Ok(address!("C36442b4a4522E871399CD717aBDD847Ab11FE88"))
        );
    }

    #[test]
    fn missing_or_blank_address_is_rejected() {
        assert_eq!(constructor_address(None), Err(ConfigError::MissingAddress));
        assert_eq!(
            constructor_address(Some("  ")),
            Err(ConfigError::MissingAddress)
        );
    }

    #[test]
    fn malformed_address_is_rejected_locally() {
        let err = constructor_address(Some("0x1234")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidAddress(AddressError::Length(_, 4))
        ));
    }
}
