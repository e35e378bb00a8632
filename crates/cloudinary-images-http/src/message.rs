use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Human-readable message for an Admin API response.
///
/// Cloudinary reports failures as `{"error":{"message":…}}` and some
/// successes as `{"message":…}`; anything else falls back to the reason
/// phrase.
pub fn remote_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.error.message;
    }
    if let Ok(parsed) = serde_json::from_str::<MessageBody>(body) {
        return parsed.message;
    }
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| status.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_message() {
        let body = r#"{"error":{"message":"Invalid api_key 123"}}"#;
        assert_eq!(
            remote_message(StatusCode::UNAUTHORIZED, body),
            "Invalid api_key 123"
        );
    }

    #[test]
    fn reads_success_message() {
        assert_eq!(
            remote_message(StatusCode::OK, r#"{"message":"updated"}"#),
            "updated"
        );
    }

    #[test]
    fn falls_back_to_reason_phrase() {
        assert_eq!(remote_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(
            remote_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "Bad Gateway"
        );
    }

    #[test]
    fn unknown_status_uses_code() {
        let status = StatusCode::from_u16(420).unwrap();
        assert_eq!(remote_message(status, ""), "420");
    }
}
