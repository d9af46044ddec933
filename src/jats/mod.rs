//! Article document handling and text extraction.
//!
//! PMC serves open-access articles as JATS XML. Detection does not care
//! about the markup, only about the human-readable prose, so this module
//! reduces a fetched document to a single normalized text string: content
//! is taken from paragraphs, titles (outside tables), abstracts, and
//! captions, joined with single spaces and whitespace-collapsed.
//!
//! Extraction never fails. A document with no obtainable text (including
//! one whose markup cannot be parsed) extracts to the empty string, which
//! the batch processor reports as "no extractable text", not as an error.
//!
//! # Example
//!
//! ```
//! use softscan::ArticleDocument;
//!
//! let doc = ArticleDocument::new(r#"
//! <article>
//!   <front>
//!     <article-meta>
//!       <abstract><p>We compare analysis toolchains.</p></abstract>
//!     </article-meta>
//!   </front>
//!   <body>
//!     <sec>
//!       <title>Statistical analysis</title>
//!       <p>All tests were two-sided and run in SPSS version 26.</p>
//!     </sec>
//!   </body>
//! </article>"#);
//!
//! assert_eq!(
//!     doc.extract_text(),
//!     "We compare analysis toolchains. Statistical analysis \
//!      All tests were two-sided and run in SPSS version 26."
//! );
//! ```

mod parse;

use parse::extract_text;

/// A fetched article document, as returned by a
/// [`DocumentFetcher`](crate::DocumentFetcher).
///
/// Wraps the raw JATS XML; the only operation the scanning pipeline needs
/// is [`extract_text`](ArticleDocument::extract_text).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDocument {
    xml: String,
}

impl ArticleDocument {
    /// Wraps raw article XML.
    pub fn new(xml: impl Into<String>) -> Self {
        Self { xml: xml.into() }
    }

    /// The raw XML as fetched.
    pub fn xml(&self) -> &str {
        &self.xml
    }

    /// Extracts the article's readable text.
    ///
    /// Total by contract: returns the empty string when no text is
    /// obtainable, whatever the reason. Callers never need to handle an
    /// extraction error.
    pub fn extract_text(&self) -> String {
        extract_text(&self.xml)
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_article_extraction() {
        let doc = ArticleDocument::new(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<pmc-articleset>
  <article>
    <front>
      <article-meta>
        <title-group><article-title>Toolchain survey</article-title></title-group>
        <abstract><p>Software usage was surveyed across 200 trials.</p></abstract>
      </article-meta>
    </front>
    <body>
      <sec>
        <title>Methods</title>
        <p>Analyses were performed using R version 4.1.2 and SPSS 26.</p>
        <table-wrap id="t1">
          <title>Table 1</title>
          <caption><p>Software by discipline.</p></caption>
          <table><tr><td>R</td><td>120</td></tr></table>
        </table-wrap>
      </sec>
      <sec>
        <title>Results</title>
        <p>Most trials named at least one package.</p>
      </sec>
    </body>
  </article>
</pmc-articleset>"#,
        );

        // article-title is not in the structural role list; table titles and
        // cells are excluded, table captions kept
        assert_eq!(
            doc.extract_text(),
            "Software usage was surveyed across 200 trials. Methods \
             Analyses were performed using R version 4.1.2 and SPSS 26. \
             Software by discipline. Results Most trials named at least one package."
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(ArticleDocument::new("").extract_text(), "");
        assert_eq!(ArticleDocument::default().extract_text(), "");
    }

    #[test]
    fn test_xml_accessor_round_trip() {
        let doc = ArticleDocument::new("<article/>");
        assert_eq!(doc.xml(), "<article/>");
    }
}
