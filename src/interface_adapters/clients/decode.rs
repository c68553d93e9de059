use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::failure::ClientError;
use crate::domain::validation::{Validate, ValidationIssue};
use crate::interface_adapters::casing::to_camel_case;

/// Camel-cases a response body, decodes it into its schema and runs the
/// schema's checks. Shape mismatches carry the converted payload for diagnostics.
pub fn decode_response<T>(raw: Value) -> Result<T, ClientError>
where
    T: DeserializeOwned + Validate,
{
    let payload = to_camel_case(raw);
    let decoded = match T::deserialize(&payload) {
        Ok(decoded) => decoded,
        Err(err) => {
            return Err(ClientError::response_validation(issue_from_serde(&err), payload));
        }
    };
    if let Err(issue) = decoded.validate() {
        return Err(ClientError::response_validation(issue, payload));
    }
    Ok(decoded)
}

// serde_json only names the field for missing keys ("missing field `userId`").
fn issue_from_serde(err: &serde_json::Error) -> ValidationIssue {
    let message = err.to_string();
    if let Some(rest) = message.strip_prefix("missing field `")
        && let Some((field, _)) = rest.split_once('`')
    {
        return ValidationIssue::new(field, "Required");
    }
    ValidationIssue::new("", message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::MeResponse;
    use crate::domain::failure::RESPONSE_VALIDATION_CONTEXT;
    use serde_json::json;

    #[test]
    fn when_payload_is_snake_case_then_it_decodes() {
        let me: MeResponse = decode_response(json!({
            "user": {
                "id": "0d6f5a3e-2f4b-4a8e-9c71-5d3b2a1e0f99",
                "email": "ana@example.com",
                "name": "Ana",
                "created_at": "2026-01-25T09:00:00Z"
            }
        }))
        .expect("payload should decode");

        assert_eq!(me.user.created_at.as_deref(), Some("2026-01-25T09:00:00Z"));
    }

    #[test]
    fn when_field_is_missing_then_path_names_it() {
        let err = decode_response::<MeResponse>(json!({"profile": {}}))
            .expect_err("missing user should fail");

        let ClientError::Validation {
            issue,
            context,
            payload,
        } = err
        else {
            panic!("expected validation error");
        };
        assert_eq!(issue.path, "user");
        assert_eq!(context, RESPONSE_VALIDATION_CONTEXT);
        assert_eq!(payload, Some(json!({"profile": {}})));
    }

    #[test]
    fn when_schema_check_fails_then_nested_path_is_reported() {
        let err = decode_response::<MeResponse>(json!({
            "user": {
                "id": "0d6f5a3e-2f4b-4a8e-9c71-5d3b2a1e0f99",
                "email": "not-an-email",
                "name": "Ana"
            }
        }))
        .expect_err("invalid email should fail");

        assert!(matches!(
            err,
            ClientError::Validation { ref issue, .. } if issue.path == "user.email"
        ));
    }

    #[test]
    fn when_type_is_wrong_then_field_is_unknown() {
        let err = decode_response::<MeResponse>(json!({"user": 5})).expect_err("wrong type");

        let ClientError::Validation { issue, .. } = err else {
            panic!("expected validation error");
        };
        assert_eq!(issue.field(), "unknown");
    }
}
