use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::WebError;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Rejects requests whose `x-admin-key` header does not match the configured
/// secret. Answers 500 while no secret is configured.
pub async fn require_admin_key(
    State(admin_key): State<AdminKey>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(expected) = admin_key.expected() else {
        return Err(WebError::ServerMisconfigured(
            "Admin key is not configured (ADMIN_KEY).".to_string(),
        ));
    };

    let provided = request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if provided != expected {
        tracing::warn!("Invalid admin key attempt");
        return Err(WebError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[derive(Debug, Clone, Default)]
pub struct AdminKey {
    key: Option<Arc<str>>,
}

impl AdminKey {
    pub fn new(key: Option<String>) -> Self {
        let key = key
            .filter(|k| !k.trim().is_empty())
            .map(Arc::from);

        Self { key }
    }

    pub fn expected(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_unconfigured() {
        assert!(AdminKey::new(None).expected().is_none());
        assert!(AdminKey::new(Some("  ".to_string())).expected().is_none());
    }

    #[test]
    fn test_key_is_kept_verbatim() {
        let key = AdminKey::new(Some(" s3cret".to_string()));
        assert_eq!(key.expected(), Some(" s3cret"));
    }
}
