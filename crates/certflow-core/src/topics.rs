//! Event topic identifiers.
//!
//! Every trigger kind matches logs against the keccak256 hash of a fixed
//! canonical event signature. The hashes are a protocol contract with the
//! chain's event ABI and must be bit-exact, so they are computed from the
//! signature strings rather than hand-transcribed.

use tiny_keccak::{Hasher, Keccak};

/// `CertificateIssued(bytes32 indexed certificateId, address indexed recipient, address issuer)`
pub const CERTIFICATE_ISSUED_SIG: &str = "CertificateIssued(bytes32,address,address)";

/// `CertificateTransferred(bytes32 indexed certificateId, address indexed from, address indexed to)`
pub const CERTIFICATE_TRANSFERRED_SIG: &str = "CertificateTransferred(bytes32,address,address)";

/// `DIDOwnerChanged(address indexed identity, address owner, uint256 previousChange)`
pub const DID_OWNER_CHANGED_SIG: &str = "DIDOwnerChanged(address,address,uint256)";

/// `DIDAttributeChanged(address indexed identity, bytes32 name, bytes value, uint256 validTo)`
pub const DID_ATTRIBUTE_CHANGED_SIG: &str = "DIDAttributeChanged(address,bytes32,bytes,uint256)";

/// `AssetRegistered(address indexed owner, bytes32 indexed assetId)`
pub const ASSET_REGISTERED_SIG: &str = "AssetRegistered(address,bytes32)";

/// `Transfer(address indexed from, address indexed to, uint256 value)` — ERC-20.
pub const ERC20_TRANSFER_SIG: &str = "Transfer(address,address,uint256)";

/// keccak256 of a canonical event signature, as a `0x`-prefixed hex topic.
pub fn event_topic(signature: &str) -> String {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(signature.as_bytes());
    hasher.finalize(&mut output);
    format!("0x{}", hex::encode(output))
}

pub fn certificate_issued() -> String {
    event_topic(CERTIFICATE_ISSUED_SIG)
}

pub fn certificate_transferred() -> String {
    event_topic(CERTIFICATE_TRANSFERRED_SIG)
}

pub fn did_owner_changed() -> String {
    event_topic(DID_OWNER_CHANGED_SIG)
}

pub fn did_attribute_changed() -> String {
    event_topic(DID_ATTRIBUTE_CHANGED_SIG)
}

pub fn asset_registered() -> String {
    event_topic(ASSET_REGISTERED_SIG)
}

pub fn erc20_transfer() -> String {
    event_topic(ERC20_TRANSFER_SIG)
}
