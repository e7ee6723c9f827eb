use subtle::ConstantTimeEq;

/// Shared-secret check for the single trusted webhook caller.
///
/// The configured key is loaded once at startup. Comparison is constant-time
/// in the key contents.
#[derive(Clone)]
pub struct ApiKeyGuard {
    configured: String,
}

impl ApiKeyGuard {
    pub fn new(configured: impl Into<String>) -> Self {
        Self {
            configured: configured.into(),
        }
    }

    /// Check a presented key against the configured one.
    ///
    /// Always false when no key is configured.
    pub fn check(&self, presented: &str) -> bool {
        if self.configured.is_empty() {
            return false;
        }

        self.configured
            .as_bytes()
            .ct_eq(presented.as_bytes())
            .into()
    }
}

impl std::fmt::Debug for ApiKeyGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGuard")
            .field("configured", &"<redacted>")
            .finish()
    }
}
