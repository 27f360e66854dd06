// Utility modules

use crate::{
    constants::{ADDRESS_HEAD_CHARS, ADDRESS_TAIL_CHARS, IPFS_SCHEME},
    error::{Result, VaultError},
};

/// Shortens an account address for display: `0x1234…abcd`.
/// Inputs too short to elide are passed through unchanged.
pub fn shorten_address(address: &str) -> String {
    let trimmed = address.trim();
    if !trimmed.is_ascii() || trimmed.len() <= ADDRESS_HEAD_CHARS + ADDRESS_TAIL_CHARS {
        return trimmed.to_string();
    }
    format!(
        "{}…{}",
        &trimmed[..ADDRESS_HEAD_CHARS],
        &trimmed[trimmed.len() - ADDRESS_TAIL_CHARS..]
    )
}

/// Lowercases and validates a 0x-prefixed hex account address.
pub fn normalize_address(address: &str) -> Result<String> {
    let raw = address.trim();
    if raw.is_empty() {
        return Err(VaultError::InvalidAddress("empty address".to_string()));
    }
    let Some(body) = raw.strip_prefix("0x") else {
        return Err(VaultError::InvalidAddress(format!(
            "missing 0x prefix: {}",
            shorten_address(raw)
        )));
    };
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(VaultError::InvalidAddress(format!(
            "non-hex address: {}",
            shorten_address(raw)
        )));
    }
    Ok(raw.to_ascii_lowercase())
}

/// Rewrites a content-addressed `ipfs://` pointer to an HTTPS gateway URL.
/// Non-IPFS URIs are returned untouched.
pub fn rewrite_content_uri(uri: &str, gateway: &str) -> String {
    match uri.strip_prefix(IPFS_SCHEME) {
        Some(path) => {
            let path = path.strip_prefix("ipfs/").unwrap_or(path);
            format!("{}{}", gateway, path)
        }
        None => uri.to_string(),
    }
}
