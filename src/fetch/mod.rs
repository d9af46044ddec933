//! The document-fetch seam.
//!
//! Retrieval is a collaborator, not core logic: the batch processor only
//! needs something that maps a canonical PMC ID to an [`ArticleDocument`]
//! or a distinguishable [`FetchError`]. The `fetch` feature (on by
//! default) provides [`EutilsFetcher`], a blocking client for the NCBI
//! E-utilities `efetch` endpoint; tests and embedders can substitute any
//! implementation.

use crate::error::FetchError;
use crate::jats::ArticleDocument;
use crate::pmcid::PmcId;

#[cfg(feature = "fetch")]
mod eutils;
#[cfg(feature = "fetch")]
pub use eutils::EutilsFetcher;

/// Retrieves the structured document for a canonical PMC identifier.
///
/// Implementations are `Send + Sync` so a caller may drive several fetches
/// from a bounded worker pool; the crate's own batch processor calls them
/// strictly sequentially.
pub trait DocumentFetcher: Send + Sync {
    /// Fetches the article document for `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] distinguishing network failures, unknown
    /// identifiers, access-restricted content, and timeouts. All of them
    /// are recoverable at the batch level.
    fn fetch(&self, id: &PmcId) -> Result<ArticleDocument, FetchError>;
}
