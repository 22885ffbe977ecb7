use thiserror::Error;

/// Errors raised while reading an interaction payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("unknown interaction type `{0}`")]
    UnknownKind(String),

    #[error("missing field `{0}` in interaction payload")]
    MissingField(&'static str),

    #[error("no submitted value for action `{action_id}` in block `{block_id}`")]
    MissingInput {
        block_id: String,
        action_id: String,
    },

    #[error("wrong element type: expected `{expected}`, got `{found}`")]
    WrongElementType {
        expected: &'static str,
        found: String,
    },

    #[error("invalid payload text: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_display() {
        let err = PayloadError::UnknownKind("app_rate_limited".to_string());
        assert_eq!(err.to_string(), "unknown interaction type `app_rate_limited`");
    }

    #[test]
    fn test_wrong_element_type_display() {
        let err = PayloadError::WrongElementType {
            expected: "static_select",
            found: "button".to_string(),
        };
        assert!(err.to_string().contains("static_select"));
        assert!(err.to_string().contains("button"));
    }
}
