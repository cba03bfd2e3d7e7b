mod basic;
mod cache_bust;
mod client;

pub use basic::BasicClient;
pub use cache_bust::CacheBust;
pub use client::HttpClient;

use anyhow::{Result, bail};

/// Fetches a feed URL and returns its body as text.
///
/// A non-success HTTP status is a feed-level error; body decoding follows
/// the response charset.
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("feed request failed with status {status}");
    }

    Ok(resp.text().await?)
}
