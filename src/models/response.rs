use serde::{Deserialize, Serialize};

/// Error body the analysis service may send with a non-success status.
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: Option<String>,
}

impl UpstreamErrorBody {
    /// Detail for the log: the service's `error` field, or the status code
    /// when the body is not JSON or the field is missing.
    pub fn detail(body: &[u8], status: u16) -> String {
        serde_json::from_slice::<UpstreamErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("Error: {}", status))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub endpoint_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_uses_error_field() {
        assert_eq!(UpstreamErrorBody::detail(br#"{"error":"bad file"}"#, 500), "bad file");
    }

    #[test]
    fn test_detail_falls_back_to_status() {
        assert_eq!(UpstreamErrorBody::detail(b"<html>oops</html>", 502), "Error: 502");
        assert_eq!(UpstreamErrorBody::detail(br#"{"type":"ValueError"}"#, 500), "Error: 500");
    }
}
