use async_trait::async_trait;
use reqwest::{Request, Response};

/// Request execution seam for the feed fetchers.
///
/// [`BasicClient`](super::BasicClient) is the real transport; decorators
/// like [`CacheBust`](super::CacheBust) wrap another client and adjust the
/// request on the way through. Tests substitute their own implementation.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
