use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::instrument;

const MAX_BODY_BYTES: u64 = 5 * 1024 * 1024;
const MAX_REDIRECTS: usize = 10;

// News sites routinely serve bot-detection pages to unknown user agents, so
// the fetch presents itself as a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
            .parse()
            .unwrap(),
    );
    headers.insert(ACCEPT_LANGUAGE, "en-US,en;q=0.5".parse().unwrap());

    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(15))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .default_headers(headers)
        .build()
        .expect("Failed to build HTTP client")
});

/// Download a news page and decode it to UTF-8.
///
/// Rejections happen as early as possible: bad URLs before the request,
/// oversize bodies on the Content-Length header when present, non-HTML
/// payloads before the body download.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    if let Some(declared) = response.content_length()
        && declared > MAX_BODY_BYTES
    {
        return Err(FetchError::BodyTooLarge(declared));
    }

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    // Articles are HTML; PDF and image links belong on the upload channel.
    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let url_final = response.url().clone();
    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // The header can lie or be absent, so the cap applies to the real body too.
    if body_bytes.len() as u64 > MAX_BODY_BYTES {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    process_response(url_final, status, body_bytes, &content_type)
}
