//! Web Page Fetcher — job-posting URL to readable text.
//!
//! Retrieval is delegated to a `PageReader`. The production reader goes through a
//! text-rendering proxy; the block-marker lists below are heuristics over that
//! proxy's output and are the first thing to revisit when a site changes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Phrases that only appear on challenge, denial or error pages, never on a posting.
const BLOCK_PAGE_MARKERS: &[&str] = &[
    "Just a moment...",
    "Checking your browser",
    "Access Denied",
    "Direct target URL returned error 403",
    "Page not found",
    "لم يتم العثور على الصفحة",
    "Direct target URL returned error 404",
];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("'{0}' is not a valid web address. Please check the URL.")]
    InvalidUrl(String),

    #[error("The job board blocked our automated access. Please copy-paste the job description manually.")]
    Blocked,

    #[error("The job page could not be found. Please check the URL.")]
    NotFound,

    #[error("We couldn't extract the job details from this link. Please copy-paste it manually.")]
    Unextractable,

    #[error("Extraction failed: {0}")]
    Generic(String),
}

/// Turns a URL into readable text. Swappable so the heuristics can be tested offline.
#[async_trait]
pub trait PageReader: Send + Sync {
    async fn read(&self, url: &str) -> Result<String, FetchError>;
}

/// Reads pages through a reader proxy that renders arbitrary sites as text/markdown.
/// The target URL is appended verbatim to the proxy base, e.g. `https://r.jina.ai/<url>`.
pub struct ReaderProxy {
    client: Client,
    base_url: String,
}

impl ReaderProxy {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.reader_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PageReader for ReaderProxy {
    async fn read(&self, url: &str) -> Result<String, FetchError> {
        let proxied = format!("{}/{}", self.base_url, url);

        let response = self
            .client
            .get(&proxied)
            .send()
            .await
            .map_err(|e| FetchError::Generic(e.to_string()))?;

        match response.status() {
            StatusCode::FORBIDDEN => return Err(FetchError::Blocked),
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            status if !status.is_success() => {
                return Err(FetchError::Generic(format!(
                    "HTTP error occurred: {}",
                    status.as_u16()
                )))
            }
            _ => {}
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Generic(e.to_string()))
    }
}

/// Fetches a job posting and returns its text, or a classified failure.
pub async fn fetch_job_description(
    reader: &dyn PageReader,
    url: &str,
) -> Result<String, FetchError> {
    let target = normalize_job_url(url)?;
    info!("Fetching job description from {}", target);

    let content = reader.read(&target).await?;
    if let Some(err) = classify_content(&content) {
        warn!("Job page at {} rejected: {}", target, err);
        return Err(err);
    }

    info!("Fetched {} chars of job description", content.chars().count());
    Ok(content)
}

/// Validates `url` and rewrites LinkedIn collection/search links that carry a
/// `currentJobId` to the stable per-job page.
pub fn normalize_job_url(url: &str) -> Result<String, FetchError> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).map_err(|_| FetchError::InvalidUrl(trimmed.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(trimmed.to_string()));
    }

    let is_linkedin = parsed
        .host_str()
        .map(|host| host == "linkedin.com" || host.ends_with(".linkedin.com"))
        .unwrap_or(false);

    if is_linkedin {
        let job_id = parsed
            .query_pairs()
            .find(|(key, _)| key == "currentJobId")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()));

        if let Some(job_id) = job_id {
            return Ok(format!("https://www.linkedin.com/jobs/view/{job_id}/"));
        }
    }

    Ok(trimmed.to_string())
}

/// Inspects proxy output for block pages. `None` means the content looks usable.
///
/// A marker hit is `Blocked` on a 403 or challenge page, `NotFound` on a 404 or
/// "not found" page, and `Unextractable` for anything else (denials, browser
/// checks, localized error pages).
pub fn classify_content(content: &str) -> Option<FetchError> {
    if content.trim().is_empty() {
        return Some(FetchError::Unextractable);
    }
    if !BLOCK_PAGE_MARKERS.iter().any(|m| content.contains(m)) {
        return None;
    }
    if content.contains("error 403") || content.contains("Just a moment") {
        return Some(FetchError::Blocked);
    }
    if content.contains("error 404") || content.to_lowercase().contains("not found") {
        return Some(FetchError::NotFound);
    }
    Some(FetchError::Unextractable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    /// Records the requested URL and returns canned content.
    struct FakeReader {
        reply: Result<String, fn() -> FetchError>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeReader {
        fn returning(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> FetchError) -> Self {
            Self {
                reply: Err(err),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageReader for FakeReader {
        async fn read(&self, url: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            match &self.reply {
                Ok(content) => Ok(content.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    #[tokio::test]
    async fn test_linkedin_collection_link_is_rewritten() {
        let reader = FakeReader::returning("Senior Rust Engineer\nWe build things.");
        let url = "https://www.linkedin.com/jobs/collections/recommended/?currentJobId=12345&origin=JYMBII";

        let text = fetch_job_description(&reader, url).await.unwrap();

        assert_eq!(text, "Senior Rust Engineer\nWe build things.");
        assert_eq!(
            reader.requested.lock().unwrap().as_slice(),
            ["https://www.linkedin.com/jobs/view/12345/"]
        );
    }

    #[test]
    fn test_non_numeric_job_id_is_left_alone() {
        let url = "https://www.linkedin.com/jobs/search/?currentJobId=abc";
        assert_eq!(normalize_job_url(url).unwrap(), url);
    }

    #[test]
    fn test_other_sites_are_left_alone() {
        let url = "https://boards.example.com/jobs?currentJobId=12345";
        assert_eq!(normalize_job_url(url).unwrap(), url);
    }

    #[test]
    fn test_invalid_urls_are_rejected() {
        assert!(matches!(normalize_job_url("not a url"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(
            normalize_job_url("ftp://example.com/job"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_challenge_pages_classify_as_blocked() {
        for page in [
            "Title: Just a moment...\nEnable JavaScript",
            "Warning: Direct target URL returned error 403: Forbidden",
            "Access Denied\nWarning: Direct target URL returned error 403: Forbidden",
        ] {
            assert!(matches!(classify_content(page), Some(FetchError::Blocked)), "{page}");
        }
    }

    #[test]
    fn test_missing_pages_classify_as_not_found() {
        for page in [
            "Page not found | LinkedIn",
            "Warning: Direct target URL returned error 404: Not Found",
        ] {
            assert!(matches!(classify_content(page), Some(FetchError::NotFound)), "{page}");
        }
    }

    #[test]
    fn test_other_block_pages_are_unextractable() {
        for page in [
            "Access Denied - you don't have permission",
            "Checking your browser before accessing",
            "لم يتم العثور على الصفحة",
        ] {
            assert!(
                matches!(classify_content(page), Some(FetchError::Unextractable)),
                "{page}"
            );
        }
    }

    #[test]
    fn test_not_found_wording_without_marker_is_usable() {
        assert!(classify_content("Backend Engineer\nRelocation: not found necessary").is_none());
    }

    #[test]
    fn test_empty_content_is_unextractable() {
        assert!(matches!(classify_content("  \n "), Some(FetchError::Unextractable)));
    }

    #[test]
    fn test_normal_posting_passes() {
        assert!(classify_content("Backend Engineer\nRequirements: Rust, SQL").is_none());
    }

    #[test]
    fn test_errors_carry_manual_paste_guidance() {
        assert!(FetchError::Blocked.to_string().contains("copy-paste"));
        assert!(FetchError::Unextractable.to_string().contains("copy-paste"));
        assert!(FetchError::NotFound.to_string().contains("check the URL"));
    }

    #[tokio::test]
    async fn test_reader_errors_propagate() {
        let reader = FakeReader::failing(|| FetchError::Blocked);
        let err = fetch_job_description(&reader, "https://jobs.example.com/1")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Blocked));
    }

    fn proxy_for(server: &MockServer) -> ReaderProxy {
        let config = Config {
            reader_base_url: server.uri(),
            ..Config::default()
        };
        ReaderProxy::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_reader_proxy_sends_browser_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/https://jobs.example.com/42"))
            .and(|req: &Request| {
                req.headers
                    .get("user-agent")
                    .and_then(|v| v.to_str().ok())
                    == Some(BROWSER_USER_AGENT)
            })
            .respond_with(ResponseTemplate::new(200).set_body_string("Job: Platform Engineer"))
            .expect(1)
            .mount(&server)
            .await;

        let text = proxy_for(&server)
            .read("https://jobs.example.com/42")
            .await
            .unwrap();
        assert_eq!(text, "Job: Platform Engineer");
    }

    #[tokio::test]
    async fn test_reader_proxy_maps_http_status() {
        let server = MockServer::start().await;
        Mock::given(path("/https://blocked.example.com/"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(path("/https://gone.example.com/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(path("/https://broken.example.com/"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let proxy = proxy_for(&server);
        assert!(matches!(
            proxy.read("https://blocked.example.com/").await,
            Err(FetchError::Blocked)
        ));
        assert!(matches!(
            proxy.read("https://gone.example.com/").await,
            Err(FetchError::NotFound)
        ));
        match proxy.read("https://broken.example.com/").await {
            Err(FetchError::Generic(msg)) => assert_eq!(msg, "HTTP error occurred: 502"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
