//! Blocking client for the NCBI E-utilities `efetch` endpoint.

use std::time::Duration;

use tracing::debug;

use super::DocumentFetcher;
use crate::error::FetchError;
use crate::jats::ArticleDocument;
use crate::pmcid::PmcId;

const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker NCBI embeds in efetch responses for articles whose publisher
/// does not participate in the open-access subset.
const RESTRICTED_MARKER: &str = "does not allow downloading of the full text";

/// Fetches open-access article XML from PMC via E-utilities.
///
/// The underlying HTTP client applies a bounded per-request timeout
/// (default 30 s), reported as [`FetchError::TimedOut`]. Request pacing is
/// the batch processor's responsibility, not the client's.
///
/// # Examples
///
/// ```no_run
/// use softscan::{DocumentFetcher, EutilsFetcher, PmcId};
///
/// let fetcher = EutilsFetcher::new().unwrap();
/// let id = PmcId::normalize("PMC7654321").unwrap();
/// let doc = fetcher.fetch(&id).unwrap();
/// println!("{} characters of XML", doc.xml().len());
/// ```
pub struct EutilsFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl EutilsFetcher {
    /// Creates a client with the default endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("softscan/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: EUTILS_BASE_URL.to_string(),
        })
    }

    /// Points the client at a different endpoint (builder style).
    ///
    /// Intended for mirrors and for tests running against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self, id: &PmcId) -> String {
        format!("{}?db=pmc&id={}&retmode=xml", self.base_url, id.digits())
    }
}

impl DocumentFetcher for EutilsFetcher {
    fn fetch(&self, id: &PmcId) -> Result<ArticleDocument, FetchError> {
        let url = self.request_url(id);
        debug!(id = %id, "fetching article XML");

        let response = self.client.get(&url).send().map_err(classify_transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(format!("{id}: HTTP 404")));
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("{id}: HTTP {status}")));
        }

        let body = response.text().map_err(classify_transport)?;
        classify_body(id, &body)?;
        Ok(ArticleDocument::new(body))
    }
}

fn classify_transport(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::TimedOut(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

/// Classifies an HTTP-200 efetch body.
///
/// efetch reports unknown and embargoed identifiers in-band rather than
/// via status codes, so the body itself has to be inspected before it is
/// accepted as an article document.
fn classify_body(id: &PmcId, body: &str) -> Result<(), FetchError> {
    if body.contains(RESTRICTED_MARKER) {
        return Err(FetchError::AccessRestricted(format!(
            "{id} is not in the PMC open-access subset"
        )));
    }
    if !body.contains("<article") {
        return Err(FetchError::NotFound(format!("{id}: no article record in response")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> PmcId {
        PmcId::normalize(raw).unwrap()
    }

    #[test]
    fn test_request_url() {
        let fetcher = EutilsFetcher::new().unwrap();
        assert_eq!(
            fetcher.request_url(&id("PMC7654321")),
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi?db=pmc&id=7654321&retmode=xml"
        );

        let fetcher = fetcher.with_base_url("http://localhost:8080/efetch");
        assert_eq!(
            fetcher.request_url(&id("42")),
            "http://localhost:8080/efetch?db=pmc&id=42&retmode=xml"
        );
    }

    #[test]
    fn test_classify_body_accepts_articles() {
        let body = r#"<pmc-articleset><article><body><p>text</p></body></article></pmc-articleset>"#;
        assert!(classify_body(&id("1"), body).is_ok());
    }

    #[test]
    fn test_classify_body_restricted() {
        let body = format!(
            "<pmc-articleset><!-- The publisher of this article {} in PMC. --></pmc-articleset>",
            RESTRICTED_MARKER
        );
        let err = classify_body(&id("1"), &body).unwrap_err();
        assert!(matches!(err, FetchError::AccessRestricted(_)));
        assert!(err.message().contains("PMC1"));
    }

    #[test]
    fn test_classify_body_no_article() {
        let body = "<eFetchResult><ERROR>Empty id list - nothing to do</ERROR></eFetchResult>";
        let err = classify_body(&id("1"), body).unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }
}
