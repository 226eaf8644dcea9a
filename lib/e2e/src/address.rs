use alloy::primitives::Address;

/// Reasons a string is not a proper address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The string does not start with `0x`.
    #[error("address `{0}` is missing the 0x prefix")]
    MissingPrefix(String),
    /// The string has the wrong number of hex digits.
    #[error("address `{0}` must have 40 hex digits, found {1}")]
    Length(String, usize),
    /// The string contains characters outside `[0-9a-fA-F]`.
    #[error("address `{0}` contains non-hex characters")]
    NotHex(String),
    /// The string is mixed case but the case doesn't match EIP-55.
    #[error("address `{0}` has an invalid EIP-55 checksum")]
    Checksum(String),
}

/// Parses `s` as an address: `0x` followed by 40 hex digits. Mixed case
/// input must carry a valid EIP-55 checksum, while all-lowercase and
/// all-uppercase input is accepted as is.
///
/// # Errors
///
/// Returns the first [`AddressError`] the input violates.
pub fn parse_address(s: &str) -> Result<Address, AddressError> {
    let Some(digits) = s.strip_prefix("0x") else {
        return Err(AddressError::MissingPrefix(s.to_string()));
    };

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::NotHex(s.to_string()));
    }

    if digits.len() != 40 {
        return Err(AddressError::Length(s.to_string(), digits.len()));
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(s, None)
            .map_err(|_| AddressError::Checksum(s.to_string()));
    }

    s.parse().map_err(|_| AddressError::NotHex(s.to_string()))
}

/// Whether `s` is a proper address, see [`parse_address`].
#[must_use]
pub fn is_proper_address(s: &str) -> bool {
    parse_address(s).is_ok()
}
