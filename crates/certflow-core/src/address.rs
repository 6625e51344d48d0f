//! Address, hash, and DID string validation.
//!
//! Addresses are hex-encoded and case carries no semantic meaning, so every
//! comparison in the pipeline goes through [`same_address`].

use crate::error::CodecError;

/// DID method prefix for chain identities (`did:certflow:0x…`).
pub const DID_PREFIX: &str = "did:certflow:";

fn is_hex_of_len(s: &str, len: usize) -> bool {
    match s.strip_prefix("0x") {
        Some(body) => body.len() == len && body.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Returns `true` for a well-formed 20-byte hex address (`0x` + 40 hex chars).
pub fn is_address(s: &str) -> bool {
    is_hex_of_len(s, 40)
}

/// Returns `true` for a well-formed 32-byte hex hash (`0x` + 64 hex chars).
pub fn is_hash(s: &str) -> bool {
    is_hex_of_len(s, 64)
}

/// Returns `true` for a well-formed chain DID.
pub fn is_did(s: &str) -> bool {
    s.strip_prefix(DID_PREFIX).is_some_and(is_address)
}

/// Validate and lowercase an address.
pub fn normalize_address(s: &str) -> Result<String, CodecError> {
    if is_address(s) {
        Ok(s.to_ascii_lowercase())
    } else {
        Err(CodecError::InvalidAddress(s.to_string()))
    }
}

/// Case-insensitive address equality.
pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Extract the address held by a DID, lowercased.
pub fn did_to_address(did: &str) -> Result<String, CodecError> {
    did.strip_prefix(DID_PREFIX)
        .filter(|body| is_address(body))
        .map(|body| body.to_ascii_lowercase())
        .ok_or_else(|| CodecError::InvalidDid(did.to_string()))
}

/// Build the DID for an address.
pub fn address_to_did(address: &str) -> Result<String, CodecError> {
    Ok(format!("{DID_PREFIX}{}", normalize_address(address)?))
}

/// Extract the 20-byte address packed into a 32-byte topic or data word.
///
/// Indexed address parameters are left-padded to 32 bytes; the address is the
/// last 20 bytes.
pub fn topic_to_address(topic: &str) -> Result<String, CodecError> {
    let body = topic.strip_prefix("0x").unwrap_or(topic);
    if body.len() != 64 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CodecError::MalformedLog(format!(
            "expected 32-byte word, got {topic}"
        )));
    }
    Ok(format!("0x{}", body[24..].to_ascii_lowercase()))
}

/// Extract the first 32-byte word of a log's data payload.
pub fn data_word(data: &str, index: usize) -> Result<String, CodecError> {
    let body = data.strip_prefix("0x").unwrap_or(data);
    let start = index * 64;
    let end = start + 64;
    if body.len() < end {
        return Err(CodecError::MalformedLog(format!(
            "data has no word {index}: {data}"
        )));
    }
    Ok(format!("0x{}", &body[start..end]))
}
