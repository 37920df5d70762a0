//! Address and object ID format utilities.
//!
//! Sui addresses and object IDs are 32-byte identifiers rendered as `0x`
//! followed by 64 hex characters. Object IDs may also appear in short form
//! (`0x8` for system objects); [`normalize_object_id`] expands them.

/// Number of hex characters in a full-width address or object ID.
pub const HEX_LEN: usize = 64;

/// Validate Sui address format.
///
/// Accepts exactly `0x` + 64 hex characters (either case). Short forms,
/// missing prefixes, and non-hex characters are rejected.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex_str) => {
            hex_str.len() == HEX_LEN && hex_str.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Expand an object ID to its canonical 64-digit lowercase form.
///
/// Accepts `0x` + 1..=64 hex digits. Returns `None` for anything else.
pub fn normalize_object_id(object_id: &str) -> Option<String> {
    let hex_str = object_id.strip_prefix("0x")?;
    if hex_str.is_empty()
        || hex_str.len() > HEX_LEN
        || !hex_str.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return None;
    }

    Some(format!(
        "0x{:0>width$}",
        hex_str.to_ascii_lowercase(),
        width = HEX_LEN
    ))
}

/// Convert raw 32-byte address bytes to a `0x`-prefixed hex string.
pub fn address_to_string(address_bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(address_bytes))
}

/// Decode a `0x`-prefixed address string into its 32 raw bytes.
pub fn string_to_address(address_str: &str) -> Result<[u8; 32], String> {
    if !is_valid_address(address_str) {
        return Err(format!("Invalid Sui address: {}", address_str));
    }

    let bytes = hex::decode(&address_str[2..]).map_err(|e| format!("Invalid address hex: {}", e))?;
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}
