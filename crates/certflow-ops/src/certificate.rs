//! Certificate operations against the registry REST API.

use serde::Serialize;
use serde_json::{json, Value};

use certflow_core::address::{is_hash, normalize_address};
use certflow_core::error::CodecError;
use certflow_rpc::RegistryClient;

use crate::error::OpsError;

fn validate_certificate_id(id: &str) -> Result<(), OpsError> {
    if is_hash(id) {
        Ok(())
    } else {
        Err(OpsError::Input(CodecError::InvalidHash(id.to_string())))
    }
}

/// Fetch one certificate document by its id.
pub async fn get(registry: &RegistryClient, id: &str) -> Result<Value, OpsError> {
    validate_certificate_id(id)?;
    registry
        .get(&format!("certificates/{id}"), &[])
        .await?
        .ok_or_else(|| OpsError::NotFound(format!("certificate {id}")))
}

/// Certificates currently held by an address.
pub async fn list_by_holder(
    registry: &RegistryClient,
    holder: &str,
) -> Result<Value, OpsError> {
    let holder = normalize_address(holder)?;
    Ok(registry
        .get("certificates", &[("holder", holder.as_str())])
        .await?
        .unwrap_or(Value::Array(vec![])))
}

/// Issuance request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub recipient: String,
    pub certificate_type: String,
    /// Free-form document attached to the certificate.
    pub metadata: Value,
}

/// Issue a new certificate to `request.recipient`.
pub async fn issue(registry: &RegistryClient, request: &IssueRequest) -> Result<Value, OpsError> {
    let recipient = normalize_address(&request.recipient)?;
    let body = json!({
        "recipient": recipient,
        "certificateType": request.certificate_type,
        "metadata": request.metadata,
    });
    Ok(registry.post("certificates", &body).await?)
}

/// Transfer a certificate to a new holder.
pub async fn transfer(
    registry: &RegistryClient,
    id: &str,
    to: &str,
) -> Result<Value, OpsError> {
    validate_certificate_id(id)?;
    let to = normalize_address(to)?;
    Ok(registry
        .post(&format!("certificates/{id}/transfer"), &json!({ "to": to }))
        .await?)
}

/// Revoke a certificate, with an optional reason recorded by the registry.
pub async fn revoke(
    registry: &RegistryClient,
    id: &str,
    reason: Option<&str>,
) -> Result<Value, OpsError> {
    validate_certificate_id(id)?;
    let body = match reason {
        Some(reason) => json!({ "reason": reason }),
        None => json!({}),
    };
    Ok(registry
        .post(&format!("certificates/{id}/revoke"), &body)
        .await?)
}

/// Registry-side verification verdict for a certificate.
pub async fn verify(registry: &RegistryClient, id: &str) -> Result<Value, OpsError> {
    validate_certificate_id(id)?;
    registry
        .get(&format!("certificates/{id}/verify"), &[])
        .await?
        .ok_or_else(|| OpsError::NotFound(format!("certificate {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_id_validation() {
        assert!(validate_certificate_id(&format!("0x{}", "ab".repeat(32))).is_ok());
        assert!(validate_certificate_id("0xshort").is_err());
        assert!(validate_certificate_id("0xaa00000000000000000000000000000000000001").is_err());
    }

    #[test]
    fn issue_request_wire_shape() {
        let request = IssueRequest {
            recipient: "0xaa00000000000000000000000000000000000001".into(),
            certificate_type: "diploma".into(),
            metadata: json!({"degree": "BSc"}),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["certificateType"], "diploma");
        assert_eq!(value["metadata"]["degree"], "BSc");
    }
}
