use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use chrono::Utc;

/// An [`HttpClient`] wrapper that appends the current epoch-millisecond
/// timestamp as a `_` query parameter.
///
/// Published-spreadsheet exports sit behind an aggressive edge cache; a
/// changing query string forces a fresh CSV payload on every refresh.
pub struct CacheBust<C> {
    pub inner: C,
}

impl<C> CacheBust<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for CacheBust<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let stamp = Utc::now().timestamp_millis().to_string();
        req.url_mut().query_pairs_mut().append_pair("_", &stamp);
        self.inner.execute(req).await
    }
}
