//! URL construction for the search → detail → sub-page chain.
//!
//! A loaded detail page is tagged by a marker in its canonical URL
//! (`title/tt` or `name/nm`). Sub-page URLs are only derived when the tag
//! matches the sub-page's kind.

use scraper::Html;
use strum_macros::{AsRefStr, Display};

use crate::{ScrapeError, dom};

const SEARCH_PREFIX: &str = "/find?q=";
const SEARCH_SUFFIX: &str = "&ref_=nv_sr_sm";
const FULL_CREDITS_SUFFIX: &str = "fullcredits?ref_=tt_ql_1";
const AWARDS_SUFFIX: &str = "awards?ref_=nm_ql_2";
const BIO_SUFFIX: &str = "bio?ref_=nm_ov_bio_sm";
const TITLE_MARKER: &str = "title/tt";
const NAME_MARKER: &str = "name/nm";

/// Container holding the search results list.
const RESULTS_SELECTOR: &str = ".findList";

/// Which kind of detail page is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ContextKind {
    /// A movie or TV title page.
    Title,
    /// A person (name) page.
    Person,
}

impl ContextKind {
    const fn marker(self) -> &'static str {
        match self {
            Self::Title => TITLE_MARKER,
            Self::Person => NAME_MARKER,
        }
    }
}

/// The canonical URL of a loaded detail page and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Canonical detail URL, ending in `/`.
    pub url: String,
    /// Title or person, derived from the URL marker.
    pub kind: ContextKind,
}

impl PageContext {
    /// Tags a canonical detail URL by its path marker.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] if the URL is neither a title
    /// nor a name page.
    pub fn from_url(url: String) -> Result<Self, ScrapeError> {
        let kind = if url.contains(TITLE_MARKER) {
            ContextKind::Title
        } else if url.contains(NAME_MARKER) {
            ContextKind::Person
        } else {
            return Err(ScrapeError::invalid_context(format!(
                "'{url}' is neither a title nor a name page"
            )));
        };
        Ok(Self { url, kind })
    }

    /// Fails unless this context is of the `expected` kind.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] on a kind mismatch.
    pub fn require(&self, expected: ContextKind) -> Result<(), ScrapeError> {
        if self.kind == expected && self.url.contains(expected.marker()) {
            Ok(())
        } else {
            Err(ScrapeError::invalid_context(format!(
                "wrong page type loaded for this operation: expected a {expected} page, \
                 loaded {} page {}",
                self.kind, self.url
            )))
        }
    }
}

/// Sub-pages hanging off a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum SubPage {
    /// Full cast and crew of a title.
    FullCredits,
    /// Awards listing of a person.
    Awards,
    /// Biography of a person.
    Bio,
}

impl SubPage {
    /// The context kind this sub-page belongs to.
    #[must_use]
    pub const fn required_kind(self) -> ContextKind {
        match self {
            Self::FullCredits => ContextKind::Title,
            Self::Awards | Self::Bio => ContextKind::Person,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Self::FullCredits => FULL_CREDITS_SUFFIX,
            Self::Awards => AWARDS_SUFFIX,
            Self::Bio => BIO_SUFFIX,
        }
    }
}

/// Builds the search URL for a free-text query.
///
/// The query is lower-cased and its whitespace-separated words are joined
/// with `+`, e.g. `"The Dark Knight"` searches for `the+dark+knight`.
#[must_use]
pub fn search_url(base_url: &str, query: &str) -> String {
    let lowered = query.to_lowercase();
    let terms = lowered.split_whitespace().collect::<Vec<_>>().join("+");
    format!("{base_url}{SEARCH_PREFIX}{terms}{SEARCH_SUFFIX}")
}

/// Resolves the canonical detail URL of the first search result.
///
/// The first anchor inside the results container is taken and its href is
/// cut after the last `/`, dropping the trailing leaf (usually a `?ref_`
/// tracking parameter).
///
/// # Errors
///
/// Returns [`ScrapeError::NotFound`] if the results container, its first
/// anchor, or that anchor's href is missing.
pub fn first_result_url(base_url: &str, search_page: &Html, query: &str) -> Result<String, ScrapeError> {
    let not_found = || ScrapeError::NotFound {
        query: query.to_owned(),
    };

    let results_sel = dom::selector(RESULTS_SELECTOR)?;
    let anchor_sel = dom::selector("a")?;

    let href = search_page
        .select(&results_sel)
        .next()
        .and_then(|results| results.select(&anchor_sel).next())
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or_else(not_found)?;

    let prefix = href.rfind('/').map_or(href, |idx| &href[..=idx]);
    Ok(format!("{base_url}{prefix}"))
}

/// Derives a sub-page URL for the loaded context.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidContext`] if the context is not of the
/// kind the sub-page belongs to.
pub fn derive(context: &PageContext, sub_page: SubPage) -> Result<String, ScrapeError> {
    context.require(sub_page.required_kind())?;
    Ok(format!("{}{}", context.url, sub_page.suffix()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_BASE_URL;

    #[test]
    fn builds_search_url_from_query() {
        assert_eq!(
            search_url(DEFAULT_BASE_URL, "The Dark Knight"),
            "https://www.imdb.com/find?q=the+dark+knight&ref_=nv_sr_sm"
        );
    }

    #[test]
    fn single_word_query_has_no_separator() {
        assert_eq!(
            search_url(DEFAULT_BASE_URL, "Inception"),
            "https://www.imdb.com/find?q=inception&ref_=nv_sr_sm"
        );
    }

    #[test]
    fn search_url_collapses_extra_whitespace() {
        assert_eq!(
            search_url("https://x.test", "  Leonardo   DiCaprio "),
            "https://x.test/find?q=leonardo+dicaprio&ref_=nv_sr_sm"
        );
    }

    #[test]
    fn resolves_first_result_and_drops_leaf() {
        let page = Html::parse_document(
            r#"<html><body>
                <table class="findList">
                  <tr><td><a href="/title/tt0468569/?ref_=fn_al_tt_1">The Dark Knight</a></td></tr>
                  <tr><td><a href="/title/tt1345836/?ref_=fn_al_tt_2">The Dark Knight Rises</a></td></tr>
                </table>
            </body></html>"#,
        );
        assert_eq!(
            first_result_url(DEFAULT_BASE_URL, &page, "the dark knight").unwrap(),
            "https://www.imdb.com/title/tt0468569/"
        );
    }

    #[test]
    fn missing_results_container_is_not_found() {
        let page = Html::parse_document("<html><body><p>No results</p></body></html>");
        let err = first_result_url(DEFAULT_BASE_URL, &page, "zzzz").unwrap_err();
        assert!(matches!(err, ScrapeError::NotFound { query } if query == "zzzz"));
    }

    #[test]
    fn empty_results_container_is_not_found() {
        let page = Html::parse_document(r#"<table class="findList"></table>"#);
        assert!(matches!(
            first_result_url(DEFAULT_BASE_URL, &page, "q"),
            Err(ScrapeError::NotFound { .. })
        ));
    }

    #[test]
    fn tags_context_by_url_marker() {
        let title = PageContext::from_url("https://www.imdb.com/title/tt0468569/".into()).unwrap();
        assert_eq!(title.kind, ContextKind::Title);
        let person = PageContext::from_url("https://www.imdb.com/name/nm0000288/".into()).unwrap();
        assert_eq!(person.kind, ContextKind::Person);
        assert!(matches!(
            PageContext::from_url("https://www.imdb.com/company/co0002663/".into()),
            Err(ScrapeError::InvalidContext { .. })
        ));
    }

    #[test]
    fn derives_sub_pages_for_matching_context() {
        let title = PageContext::from_url("https://www.imdb.com/title/tt0468569/".into()).unwrap();
        assert_eq!(
            derive(&title, SubPage::FullCredits).unwrap(),
            "https://www.imdb.com/title/tt0468569/fullcredits?ref_=tt_ql_1"
        );

        let person = PageContext::from_url("https://www.imdb.com/name/nm0000138/".into()).unwrap();
        assert_eq!(
            derive(&person, SubPage::Awards).unwrap(),
            "https://www.imdb.com/name/nm0000138/awards?ref_=nm_ql_2"
        );
        assert_eq!(
            derive(&person, SubPage::Bio).unwrap(),
            "https://www.imdb.com/name/nm0000138/bio?ref_=nm_ov_bio_sm"
        );
    }

    #[test]
    fn full_credits_on_person_context_is_invalid() {
        let person = PageContext::from_url("https://www.imdb.com/name/nm0000138/".into()).unwrap();
        assert!(matches!(
            derive(&person, SubPage::FullCredits),
            Err(ScrapeError::InvalidContext { .. })
        ));
    }

    #[test]
    fn awards_on_title_context_is_invalid() {
        let title = PageContext::from_url("https://www.imdb.com/title/tt0993846/".into()).unwrap();
        assert!(matches!(
            derive(&title, SubPage::Awards),
            Err(ScrapeError::InvalidContext { .. })
        ));
    }
}
