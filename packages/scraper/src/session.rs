//! The loaded page context and its cached documents.
//!
//! A [`ScrapeSession`] holds at most one loaded detail page. Loading a new
//! title or person replaces the context and drops every cached document.
//! Sub-pages are fetched lazily the first time an extractor needs them and
//! then reused until the next load, so each page is requested at most once
//! per loaded context.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use amdb_film_models::{
    Award, AwardOrganisation, CastMap, Person, PersonRelations, RoleMap, Title, TitleRelations,
};
use chrono::NaiveDate;
use scraper::Html;

use crate::extract::{awards, credits, person, title};
use crate::navigator::{self, ContextKind, PageContext, SubPage};
use crate::{HttpFetcher, PageFetcher, ScrapeConfig, ScrapeError, assemble};

struct LoadedPage {
    context: PageContext,
    main: Html,
    sub_pages: BTreeMap<SubPage, Html>,
}

/// Navigates from a query to a detail page and extracts records from it.
pub struct ScrapeSession<F = HttpFetcher> {
    fetcher: F,
    base_url: String,
    search_url: Option<String>,
    loaded: Option<LoadedPage>,
}

impl ScrapeSession<HttpFetcher> {
    /// Creates a session fetching over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the HTTP client cannot be built.
    pub fn new(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        Ok(Self::with_fetcher(&config.base_url, HttpFetcher::new(config)?))
    }
}

impl<F: PageFetcher> ScrapeSession<F> {
    /// Creates a session that fetches through `fetcher`.
    pub fn with_fetcher(base_url: &str, fetcher: F) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
            search_url: None,
            loaded: None,
        }
    }

    /// The underlying fetcher.
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The loaded context, if any.
    pub fn context(&self) -> Option<&PageContext> {
        self.loaded.as_ref().map(|loaded| &loaded.context)
    }

    /// The search URL of the most recent load.
    pub fn search_url(&self) -> Option<&str> {
        self.search_url.as_deref()
    }

    /// URL of a sub-page of the loaded context.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] if nothing is loaded or the
    /// sub-page belongs to the other context kind.
    pub fn sub_page_url(&self, sub_page: SubPage) -> Result<String, ScrapeError> {
        navigator::derive(&self.any_loaded()?.context, sub_page)
    }

    /// Searches for `query` and loads the first result as a title.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::NotFound`] if the search has no results,
    /// [`ScrapeError::InvalidContext`] if the first result is not a title,
    /// or any fetch error.
    pub fn load_title_page(&mut self, query: &str) -> Result<&PageContext, ScrapeError> {
        self.load(query, ContextKind::Title)
    }

    /// Searches for `query` and loads the first result as a person.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::NotFound`] if the search has no results,
    /// [`ScrapeError::InvalidContext`] if the first result is not a person,
    /// or any fetch error.
    pub fn load_person_page(&mut self, query: &str) -> Result<&PageContext, ScrapeError> {
        self.load(query, ContextKind::Person)
    }

    fn load(&mut self, query: &str, kind: ContextKind) -> Result<&PageContext, ScrapeError> {
        self.loaded = None;

        let search_url = navigator::search_url(&self.base_url, query);
        log::info!("Searching for {kind} '{query}': {search_url}");
        let search_page = Html::parse_document(&self.fetcher.fetch(&search_url)?);
        self.search_url = Some(search_url);

        let url = navigator::first_result_url(&self.base_url, &search_page, query)?;
        let context = PageContext::from_url(url)?;
        context.require(kind)?;

        log::info!("Loading {kind} page {}", context.url);
        let main = Html::parse_document(&self.fetcher.fetch(&context.url)?);

        let loaded = self.loaded.insert(LoadedPage {
            context,
            main,
            sub_pages: BTreeMap::new(),
        });
        Ok(&loaded.context)
    }

    fn any_loaded(&self) -> Result<&LoadedPage, ScrapeError> {
        self.loaded
            .as_ref()
            .ok_or_else(|| ScrapeError::invalid_context("no page is loaded"))
    }

    fn loaded(&self, kind: ContextKind) -> Result<&LoadedPage, ScrapeError> {
        let loaded = self.any_loaded()?;
        loaded.context.require(kind)?;
        Ok(loaded)
    }

    fn ensure_sub_page(&mut self, sub_page: SubPage) -> Result<(), ScrapeError> {
        let loaded = self
            .loaded
            .as_mut()
            .ok_or_else(|| ScrapeError::invalid_context("no page is loaded"))?;
        let url = navigator::derive(&loaded.context, sub_page)?;

        if let Entry::Vacant(entry) = loaded.sub_pages.entry(sub_page) {
            log::info!("Loading {sub_page} page {url}");
            let body = self.fetcher.fetch(&url)?;
            entry.insert(Html::parse_document(&body));
        }
        Ok(())
    }

    /// Main page and the given sub-page of the loaded context, fetching the
    /// sub-page on first use.
    fn pages(&mut self, sub_page: SubPage) -> Result<(&Html, &Html), ScrapeError> {
        self.ensure_sub_page(sub_page)?;
        let loaded = self.loaded(sub_page.required_kind())?;
        let sub = loaded
            .sub_pages
            .get(&sub_page)
            .ok_or_else(|| ScrapeError::parse(format!("{sub_page} page is not cached")))?;
        Ok((&loaded.main, sub))
    }

    fn on_main<T>(
        &self,
        kind: ContextKind,
        extract: impl FnOnce(&Html) -> Result<T, ScrapeError>,
    ) -> Result<T, ScrapeError> {
        extract(&self.loaded(kind)?.main)
    }

    fn on_sub_page<T>(
        &mut self,
        sub_page: SubPage,
        extract: impl FnOnce(&Html) -> Result<T, ScrapeError>,
    ) -> Result<T, ScrapeError> {
        let (_, page) = self.pages(sub_page)?;
        extract(page)
    }

    /// Assembles the loaded title.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] unless a title is loaded, or
    /// the first extractor error.
    pub fn title_contents(&self) -> Result<Title, ScrapeError> {
        let title = self.on_main(ContextKind::Title, assemble::title)?;
        log::info!("Extracted {}", title.short_label());
        Ok(title)
    }

    /// Assembles crew, genres and cast of the loaded title.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] unless a title is loaded, or
    /// the first fetch or extractor error.
    pub fn title_relations(&mut self) -> Result<TitleRelations, ScrapeError> {
        let (main, full_credits) = self.pages(SubPage::FullCredits)?;
        let relations = assemble::title_relations(main, full_credits)?;
        log::info!(
            "Extracted {} directors, {} writers, {} producers, {} genres and {} cast members",
            relations.directors.len(),
            relations.writers.len(),
            relations.producers.len(),
            relations.genres.len(),
            relations.cast.len()
        );
        Ok(relations)
    }

    /// Assembles the loaded person, fetching their bio page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] unless a person is loaded, or
    /// the first fetch or extractor error.
    pub fn person_contents(&mut self) -> Result<Person, ScrapeError> {
        let (main, bio) = self.pages(SubPage::Bio)?;
        let person = assemble::person(main, bio)?;
        log::info!("Extracted {}", person.short_label());
        Ok(person)
    }

    /// Assembles the loaded person's awards by organisation.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidContext`] unless a person is loaded, or
    /// the first fetch or extractor error.
    pub fn person_relations(&mut self) -> Result<PersonRelations, ScrapeError> {
        let relations = self.on_sub_page(SubPage::Awards, assemble::person_relations)?;
        for (organisation, awards) in &relations.awards {
            log::info!("Extracted {} {organisation} awards", awards.len());
        }
        Ok(relations)
    }

    /// Title name.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_name(&self) -> Result<String, ScrapeError> {
        self.on_main(ContextKind::Title, title::name)
    }

    /// Plot summary.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_summary(&self) -> Result<String, ScrapeError> {
        self.on_main(ContextKind::Title, title::summary)
    }

    /// Release year.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_release_year(&self) -> Result<i32, ScrapeError> {
        self.on_main(ContextKind::Title, title::release_year)
    }

    /// Certificate rating.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_certificate_rating(&self) -> Result<String, ScrapeError> {
        self.on_main(ContextKind::Title, title::certificate_rating)
    }

    /// Running time in minutes.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_length_in_minutes(&self) -> Result<u32, ScrapeError> {
        self.on_main(ContextKind::Title, title::length_in_minutes)
    }

    /// Storyline.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_storyline(&self) -> Result<String, ScrapeError> {
        self.on_main(ContextKind::Title, title::storyline)
    }

    /// Tagline.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_tagline(&self) -> Result<String, ScrapeError> {
        self.on_main(ContextKind::Title, title::tagline)
    }

    /// Genre names.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_genres(&self) -> Result<Vec<String>, ScrapeError> {
        self.on_main(ContextKind::Title, title::genres)
    }

    /// Main cast in billing order.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_cast(&self) -> Result<CastMap, ScrapeError> {
        self.on_main(ContextKind::Title, title::cast)
    }

    /// Directors, from the full-credits page.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_directors(&mut self) -> Result<Vec<String>, ScrapeError> {
        self.on_sub_page(SubPage::FullCredits, credits::directors)
    }

    /// Writers and their roles, from the full-credits page.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_writers(&mut self) -> Result<RoleMap, ScrapeError> {
        self.on_sub_page(SubPage::FullCredits, credits::writers)
    }

    /// Producers and their roles, from the full-credits page.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a title is loaded.
    pub fn title_producers(&mut self) -> Result<RoleMap, ScrapeError> {
        self.on_sub_page(SubPage::FullCredits, credits::producers)
    }

    /// Person name.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a person is loaded.
    pub fn person_name(&self) -> Result<String, ScrapeError> {
        self.on_main(ContextKind::Person, person::name)
    }

    /// Date of birth.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a person is loaded.
    pub fn person_date_of_birth(&self) -> Result<NaiveDate, ScrapeError> {
        self.on_main(ContextKind::Person, person::date_of_birth)
    }

    /// Mini biography, from the bio page.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a person is loaded.
    pub fn person_bio(&mut self) -> Result<String, ScrapeError> {
        self.on_sub_page(SubPage::Bio, person::bio)
    }

    /// Awards under one organisation, from the awards page.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidContext`] unless a person is loaded.
    pub fn awards_for_organisation(
        &mut self,
        organisation: AwardOrganisation,
    ) -> Result<Vec<Award>, ScrapeError> {
        self.on_sub_page(SubPage::Awards, |page| awards::awards_for(page, organisation))
    }
}
