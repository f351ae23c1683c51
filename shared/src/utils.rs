//! # Shared Utility Functions
//!
//! Address helpers used across the backend and wallet-web applications.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - Alias for `format_address` with default parameters
//!
//! ## Address Validation
//!
//! - [`is_valid_address`] - Check that a value looks like an EVM account
//!   address (`0x` prefix followed by 40 hex digits). Provider payloads are
//!   untyped JS values; the orchestrator validates them with this before
//!   accepting an account into the session.

/// Expected length of a `0x`-prefixed EVM address string.
pub const ADDRESS_LEN: usize = 42;

/// Format a wallet address by showing the first `prefix_len` and last
/// `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned
/// as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";
/// assert_eq!(format_address(addr, 6, 4), "0x8ba1...BA72");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Guard against lengths exceeding the address length to prevent panics.
    // Addresses are 0x-hex, so byte indexing is safe (ASCII-only).
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with the default 6-character prefix (keeps the
/// `0x` visible) and 4-character suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x8ba1f109551bD432803012645Ac136ddd64DBA72";
/// assert_eq!(truncate_address(addr), "0x8ba1...BA72");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Validate that `address` is a plausible EVM account address: non-empty,
/// `0x`-prefixed, 42 characters, hex digits only.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == ADDRESS_LEN
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}
