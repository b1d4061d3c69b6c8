use serde::{Deserialize, Serialize};

/// Error body the catalog service returns alongside non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub status_code: i64,
    pub status_message: String,
}

impl ServiceErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_error_body() {
        let body = ServiceErrorBody::parse(
            r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
        )
        .expect("error body");
        assert_eq!(body.status_code, 7);
        assert!(body.status_message.starts_with("Invalid API key"));
    }

    #[test]
    fn non_json_body_is_not_a_service_error() {
        assert!(ServiceErrorBody::parse("<html>bad gateway</html>").is_none());
    }
}
