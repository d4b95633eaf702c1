use axum::http::StatusCode;
use std::error::Error;
use url::Url;

pub fn internal_error<E>(err: E) -> (StatusCode, String)
where
    E: Error,
{
    tracing::error!("{}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Accepts bare hosts like `emol.com` by assuming https. Only http and https
/// targets are allowed.
pub fn normalize_url(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let lowercase = text.to_ascii_lowercase();
    let candidate = if lowercase.starts_with("http://") || lowercase.starts_with("https://") {
        text.to_string()
    } else {
        format!("https://{text}")
    };
    let url = Url::parse(&candidate).ok()?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Some(url.to_string()),
        _ => None,
    }
}

pub fn format_millis(millis: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(millis).map(|utc| {
        utc.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_url_adds_https_scheme() {
        assert_eq!(normalize_url("emol.com").as_deref(), Some("https://emol.com/"));
        assert_eq!(
            normalize_url(" http://example.org/a?b=1 ").as_deref(),
            Some("http://example.org/a?b=1")
        );
        assert_eq!(normalize_url("HTTPS://Example.org").as_deref(), Some("https://example.org/"));
    }

    #[test]
    fn normalize_url_rejects_garbage() {
        assert_eq!(normalize_url(""), None);
        assert_eq!(normalize_url("   "), None);
        assert_eq!(normalize_url("http://"), None);
        assert_eq!(normalize_url("https://exa mple.com"), None);
    }

    #[test]
    fn format_millis_renders_date() {
        let formatted = format_millis(1_700_000_000_000).unwrap();
        assert_eq!(formatted.len(), "2023-11-14 22:13:20".len());
        assert!(formatted.starts_with("2023-11-1"));
    }
}
