//! Fetching product images into scoped temporary files.
//!
//! A [`FetchedImage`] owns its temporary file; dropping it deletes the file,
//! so the upload step can fail or succeed without leaking disk.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Url};
use tempfile::NamedTempFile;

use crate::error::ImageError;

const DEFAULT_SUFFIX: &str = ".jpg";
const KNOWN_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// Downloads images with a size cap and per-request timeout. No retries.
#[derive(Clone)]
pub struct ImageFetcher {
    client: Client,
    max_bytes: u64,
}

/// An image body buffered to a temporary file, deleted on drop.
#[derive(Debug)]
pub struct FetchedImage {
    file: NamedTempFile,
    url: String,
    size_bytes: u64,
}

impl FetchedImage {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

impl ImageFetcher {
    /// # Errors
    ///
    /// Returns [`ImageError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, max_bytes: u64) -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, max_bytes })
    }

    /// Fetches `url` into a new temporary file.
    ///
    /// # Errors
    ///
    /// - [`ImageError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`ImageError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ImageError::TooLarge`] if the declared or received size exceeds the cap.
    /// - [`ImageError::EmptyBody`] if the response has no body.
    /// - [`ImageError::Http`] on network failure or timeout.
    /// - [`ImageError::Io`] if the temporary file cannot be written.
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage, ImageError> {
        let parsed = Url::parse(url).map_err(|e| ImageError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ImageError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let mut response = self.client.get(parsed.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        if response.content_length().is_some_and(|len| len > self.max_bytes) {
            return Err(self.too_large(url));
        }

        let mut file = tempfile::Builder::new()
            .prefix("catload-")
            .suffix(&suffix_for(&parsed))
            .tempfile()?;

        let mut size_bytes: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            size_bytes = size_bytes.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
            if size_bytes > self.max_bytes {
                return Err(self.too_large(url));
            }
            file.write_all(&chunk)?;
        }

        if size_bytes == 0 {
            return Err(ImageError::EmptyBody {
                url: url.to_owned(),
            });
        }
        file.flush()?;

        tracing::debug!(url, size_bytes, path = %file.path().display(), "image fetched");

        Ok(FetchedImage {
            file,
            url: url.to_owned(),
            size_bytes,
        })
    }

    fn too_large(&self, url: &str) -> ImageError {
        ImageError::TooLarge {
            url: url.to_owned(),
            limit: self.max_bytes,
        }
    }
}

/// Temporary file suffix taken from the URL's extension when it is a known
/// image type.
fn suffix_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| KNOWN_EXTENSIONS.contains(&ext.as_str()))
        .map_or_else(|| DEFAULT_SUFFIX.to_owned(), |ext| format!(".{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(url: &str) -> String {
        suffix_for(&Url::parse(url).unwrap())
    }

    #[test]
    fn suffix_uses_known_extension() {
        assert_eq!(suffix("https://cdn.example.com/a/b/photo.PNG?w=200"), ".png");
        assert_eq!(suffix("https://cdn.example.com/photo.webp"), ".webp");
    }

    #[test]
    fn suffix_defaults_to_jpg() {
        assert_eq!(suffix("https://cdn.example.com/photo"), ".jpg");
        assert_eq!(suffix("https://cdn.example.com/photo.php"), ".jpg");
        assert_eq!(suffix("https://cdn.example.com/"), ".jpg");
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let fetcher = ImageFetcher::new(5, "catload-test/0.1", 1024).unwrap();
        let err = fetcher.fetch("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, ImageError::InvalidUrl { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let fetcher = ImageFetcher::new(5, "catload-test/0.1", 1024).unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, ImageError::InvalidUrl { .. }));
    }
}
