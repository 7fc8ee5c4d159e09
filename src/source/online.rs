use std::io::Read;
use std::time::Duration;

use ureq::Agent;

use crate::error::{Result, SourceErrorKind, SuffixError};
use crate::types::RuleSet;

use super::format::ListFormat;
use super::loader::RuleLoader;

/// Canonical location of the plain-text Public Suffix List
pub const DEFAULT_LIST_URL: &str = "https://publicsuffix.org/list/public_suffix_list.dat";

/// Default timeout for a whole download
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads and parses a rule list over HTTP(S).
///
/// The fetch is blocking; use [`OnlineLoader::fetch_async`] from async code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineLoader {
    url: String,
    timeout: Duration,
    format: ListFormat,
}

impl OnlineLoader {
    /// Loader for the canonical list in plain-text format
    pub fn new() -> Self {
        Self {
            url: DEFAULT_LIST_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
            format: ListFormat::Text,
        }
    }

    /// Set a custom list URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the overall download timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the format served at the URL (default: plain text)
    pub fn with_format(mut self, format: ListFormat) -> Self {
        self.format = format;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download and parse the list
    pub fn fetch(&self) -> Result<RuleSet> {
        if self.url.is_empty() {
            return Err(SuffixError::from_kind(
                SourceErrorKind::NotConfigured,
                "list URL not configured",
            ));
        }

        tracing::info!(url = %self.url, "downloading public suffix list");
        let text = self.download()?;
        let rules = self.format.parse(&text).map_err(|e| {
            SuffixError::from_kind(
                SourceErrorKind::InvalidData,
                format!("Failed to parse list from {}: {}", self.url, e),
            )
        })?;

        if rules.is_empty() {
            return Err(SuffixError::from_kind(
                SourceErrorKind::InvalidData,
                format!("No rules in list from {}", self.url),
            ));
        }

        tracing::info!(url = %self.url, rules = rules.len(), "downloaded public suffix list");
        Ok(rules)
    }

    /// Run [`OnlineLoader::fetch`] on the blocking pool.
    ///
    /// Dropping the future abandons the result; the download itself is
    /// still bounded by the configured timeout.
    #[cfg(feature = "async")]
    pub async fn fetch_async(&self) -> Result<RuleSet> {
        let loader = self.clone();
        tokio::task::spawn_blocking(move || loader.fetch())
            .await
            .map_err(|e| {
                SuffixError::from_kind(
                    SourceErrorKind::DownloadFailed,
                    format!("Download task failed: {}", e),
                )
            })?
    }

    fn download(&self) -> Result<String> {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into();

        let response = agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Timeout(_) => SuffixError::from_kind(
                SourceErrorKind::Timeout,
                format!("Download timed out after {:?}: {}", self.timeout, self.url),
            ),
            e => SuffixError::from_kind(
                SourceErrorKind::DownloadFailed,
                format!("Download failed: {}", e),
            ),
        })?;

        let (_, body) = response.into_parts();
        let mut text = String::new();
        body.into_reader().read_to_string(&mut text).map_err(|e| {
            SuffixError::from_kind(
                SourceErrorKind::DownloadFailed,
                format!("Failed to read response body: {}", e),
            )
        })?;
        Ok(text)
    }
}

impl Default for OnlineLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleLoader for OnlineLoader {
    fn load(&self) -> Result<RuleSet> {
        self.fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one HTTP response on a local port and return its URL
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }
            let mut stream = stream;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        format!("http://{}/public_suffix_list.dat", addr)
    }

    #[test]
    fn test_online_loader_builder() {
        let loader = OnlineLoader::new()
            .with_url("http://example.com/list.json")
            .with_timeout(Duration::from_secs(5))
            .with_format(ListFormat::Json);

        assert_eq!(loader.url(), "http://example.com/list.json");
        assert_eq!(loader.timeout(), Duration::from_secs(5));
        assert_eq!(loader.format, ListFormat::Json);
    }

    #[test]
    fn test_online_loader_defaults() {
        let loader = OnlineLoader::default();
        assert_eq!(loader.url(), DEFAULT_LIST_URL);
        assert_eq!(loader.timeout(), DEFAULT_FETCH_TIMEOUT);
    }

    #[test]
    fn test_fetch_text_list() {
        let url = serve_once("200 OK", "// comment\ncom\n*.uk\n!city.kawasaki.jp\n");
        let rules = OnlineLoader::new().with_url(url).fetch().unwrap();
        assert_eq!(rules.len(), 3);
        assert!(rules.is_unrestricted("example.com"));
    }

    #[test]
    fn test_fetch_http_error() {
        let url = serve_once("404 Not Found", "");
        let err = OnlineLoader::new().with_url(url).load().unwrap_err();
        assert_eq!(err.kind(), Some(SourceErrorKind::DownloadFailed));
    }

    #[test]
    fn test_fetch_empty_list_is_invalid() {
        let url = serve_once("200 OK", "// nothing here\n");
        let err = OnlineLoader::new().with_url(url).fetch().unwrap_err();
        assert_eq!(err.kind(), Some(SourceErrorKind::InvalidData));
    }

    #[test]
    fn test_fetch_bad_json() {
        let url = serve_once("200 OK", "{\"not\": \"a list\"}");
        let err = OnlineLoader::new()
            .with_url(url)
            .with_format(ListFormat::Json)
            .fetch()
            .unwrap_err();
        assert_eq!(err.kind(), Some(SourceErrorKind::InvalidData));
    }

    #[test]
    fn test_fetch_without_url() {
        let err = OnlineLoader::new().with_url("").fetch().unwrap_err();
        assert_eq!(err.kind(), Some(SourceErrorKind::NotConfigured));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_fetch_async() {
        let url = serve_once("200 OK", "com\nco.uk\n");
        let rules = OnlineLoader::new().with_url(url).fetch_async().await.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(
            crate::registrable_domain("www.bbc.co.uk", &rules).as_deref(),
            Some("bbc.co.uk")
        );
    }
}
