/// What to do when a product's representative image cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFailurePolicy {
    /// Report the whole product as failed.
    Fail,
    /// Log the failure and report the product as successful without an image.
    Skip,
}

impl std::fmt::Display for ImageFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFailurePolicy::Fail => write!(f, "fail"),
            ImageFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub graphql_url: String,
    pub auth_token: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_builds: usize,
    pub image_timeout_secs: u64,
    pub image_max_bytes: u64,
    pub image_failure_policy: ImageFailurePolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("graphql_url", &self.graphql_url)
            .field("auth_token", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_builds", &self.max_concurrent_builds)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .field("image_max_bytes", &self.image_max_bytes)
            .field("image_failure_policy", &self.image_failure_policy)
            .finish()
    }
}
