use alloy::{
    hex,
    rpc::json_rpc::ErrorPayload,
    sol_types::{Revert, SolError},
    transports::TransportError,
};

use crate::deploy::DeployError;

/// Prefix nodes put in front of the reason in a revert error's message.
const EXECUTION_REVERTED: &str = "execution reverted: ";

/// Hardhat node's wording of a revert with a reason.
const REASON_STRING: &str = "reverted with reason string '";

/// Extension trait to recover the reason a call or deployment reverted with.
pub trait RevertExt {
    /// Human-readable revert reason carried by `self`, if `self` is a revert.
    fn revert_reason(&self) -> Option<String>;

    /// Checks that `self` is a revert with exactly `expected` as reason.
    fn reverted_with(&self, expected: &str) -> bool {
        self.revert_reason().is_some_and(|reason| reason == expected)
    }
}

impl RevertExt for ErrorPayload {
    fn revert_reason(&self) -> Option<String> {
        // ErrorPayload {
        //     code: 3,
        //     message: "execution reverted: Price must be greater than zero",
        //     data: Some(RawValue("0x08c379a0...")),
        // }
        if let Some(reason) = self
            .data
            .as_ref()
            .and_then(|raw| revert_data(raw.get()))
            .and_then(|data| Revert::abi_decode(&data).ok())
            .map(|revert| revert.reason)
        {
            return Some(reason);
        }

        let message = &*self.message;
        if let Some(start) = message.find(REASON_STRING) {
            let reason = &message[start + REASON_STRING.len()..];
            let reason = reason.strip_suffix('\'').unwrap_or(reason);
            return Some(reason.to_string());
        }

        let start = message.find(EXECUTION_REVERTED)?;
        Some(message[start + EXECUTION_REVERTED.len()..].to_string())
    }
}

impl RevertExt for TransportError {
    fn revert_reason(&self) -> Option<String> {
        self.as_error_resp().and_then(RevertExt::revert_reason)
    }
}

impl RevertExt for alloy::contract::Error {
    fn revert_reason(&self) -> Option<String> {
        let Self::TransportError(e) = self else {
            return None;
        };
        e.revert_reason()
    }
}

impl RevertExt for DeployError {
    fn revert_reason(&self) -> Option<String> {
        let Self::Transport(e) = self else {
            return None;
        };
        e.revert_reason()
    }
}

impl RevertExt for eyre::Report {
    fn revert_reason(&self) -> Option<String> {
        self.chain().find_map(|cause| {
            if let Some(e) = cause.downcast_ref::<alloy::contract::Error>() {
                e.revert_reason()
            } else if let Some(e) = cause.downcast_ref::<DeployError>() {
                e.revert_reason()
            } else {
                cause.downcast_ref::<TransportError>()?.revert_reason()
            }
        })
    }
}

/// Extracts non-empty revert data from the `data` field of an error payload.
///
/// Most nodes send a hex string; some wrap it in an object with a `data`
/// field.
fn revert_data(raw: &str) -> Option<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let encoded = match &value {
        serde_json::Value::String(s) => s.as_str(),
        serde_json::Value::Object(map) => map.get("data")?.as_str()?,
        _ => return None,
    };
    let data = hex::decode(encoded).ok()?;
    (!data.is_empty()).then_some(data)
}

#[cfg(test)]
mod tests {
    use alloy::transports::RpcError;
    use serde_json::value::RawValue;

    use super::*;

    const REASON: &str = "Price must be greater than zero";

    fn payload(code: i64, message: &str, data: Option<&str>) -> ErrorPayload {
        ErrorPayload {
            code,
            message: message.to_string().into(),
            data: data.map(|d| {
                RawValue::from_string(d.to_string()).expect("valid json")
            }),
        }
    }

    fn encoded_reason() -> String {
        let revert = Revert { reason: REASON.to_string() };
        format!("\"0x{}\"", hex::encode(revert.abi_encode()))
    }

    #[test]
    fn decodes_reason_from_revert_data() {
        let data = encoded_reason();
        let payload = payload(3, "execution reverted", Some(&data));
        assert_eq!(payload.revert_reason().as_deref(), Some(REASON));
        assert!(payload.reverted_with(REASON));
        assert!(!payload.reverted_with("Price must be positive"));
    }

    #[test]
    fn decodes_reason_from_wrapped_revert_data() {
        let data =
            format!(r#"{{"message":"revert","data":{}}}"#, encoded_reason());
        let payload = payload(-32603, "Internal error", Some(&data));
        assert_eq!(payload.revert_reason().as_deref(), Some(REASON));
    }

    #[test]
    fn falls_back_to_execution_reverted_message() {
        let message = format!("execution reverted: {REASON}");
        let payload = payload(3, &message, None);
        assert_eq!(payload.revert_reason().as_deref(), Some(REASON));

        let payload = payload_with_empty_data(&message);
        assert_eq!(payload.revert_reason().as_deref(), Some(REASON));
    }

    fn payload_with_empty_data(message: &str) -> ErrorPayload {
        payload(3, message, Some("\"0x\""))
    }

    #[test]
    fn falls_back_to_hardhat_message() {
        let message = format!(
            "Error: VM Exception while processing transaction: \
             reverted with reason string '{REASON}'"
        );
        let payload = payload(-32603, &message, None);
        assert_eq!(payload.revert_reason().as_deref(), Some(REASON));
    }

    #[test]
    fn other_errors_carry_no_reason() {
        let payload = payload(-32000, "nonce too low", None);
        assert_eq!(payload.revert_reason(), None);
        assert!(!payload.reverted_with(REASON));
    }

    #[test]
    fn contract_and_report_errors_expose_reason() {
        let data = encoded_reason();
        let rpc: TransportError =
            RpcError::ErrorResp(payload(3, "execution reverted", Some(&data)));
        assert!(rpc.reverted_with(REASON));

        let contract = alloy::contract::Error::TransportError(rpc);
        assert!(contract.reverted_with(REASON));

        let report = eyre::Report::new(contract).wrap_err("call failed");
        assert!(report.reverted_with(REASON));
    }

    #[test]
    fn deploy_errors_expose_constructor_reason() {
        let message = format!("execution reverted: {REASON}");
        let rpc = RpcError::ErrorResp(payload(3, &message, None));
        let err = DeployError::from(rpc);
        assert!(err.reverted_with(REASON));

        let report = eyre::Report::new(err);
        assert!(report.reverted_with(REASON));

        let report = eyre::eyre!("unrelated failure");
        assert_eq!(report.revert_reason(), None);
    }
}
