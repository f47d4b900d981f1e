use serde_json::Value;

use crate::error::{Result, WorkflowError};

/// Keys from `required` that the JSON object does not carry, in the given order.
///
/// A non-object body misses every key.
pub fn missing(body: &Value, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| body.get(**key).is_none())
        .map(|key| key.to_string())
        .collect()
}

pub fn require(body: &Value, required: &[&str]) -> Result<()> {
    let missing = missing(body, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::MissingFields(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keeps_order() {
        let body = json!({"password": "x", "role": "owner"});
        assert_eq!(
            missing(&body, &["username", "password", "email", "role"]),
            vec!["username".to_string(), "email".to_string()]
        );
    }

    #[test]
    fn test_null_counts_as_present() {
        let body = json!({"phone": null});
        assert!(missing(&body, &["phone"]).is_empty());
    }

    #[test]
    fn test_non_object_misses_everything() {
        let err = require(&json!([1, 2]), &["a", "b"]).unwrap_err();
        match err {
            WorkflowError::MissingFields(fields) => assert_eq!(fields, vec!["a", "b"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
