//! Product list engine: fetch, filter, sort and paginate over one catalog result.
//!
//! One upstream fetch is assumed to return the whole collection; "load more"
//! only reveals more of what is already local. The visible window is always
//! the first `page_count * page_size` products of the filtered and sorted
//! view of the last fetch result.
//!
//! Reloads are tagged with a generation number. A completion is applied only
//! if its generation is still the latest issued, so a slow earlier reload can
//! never overwrite the result of a later one.

use crate::catalog::{CatalogSource, Product};
use crate::error::Result;
use crate::filters::{Filter, FilterChain, QueryFilter};
use crate::sort::SortOrder;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Products revealed per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// What to fetch on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCriteria {
    /// Category slug; ignored when a search is given
    pub category: Option<String>,
    /// Sort to apply once the result arrives
    pub sort: Option<SortOrder>,
    /// Server-side search query; takes precedence over the category
    pub search: Option<String>,
}

impl ListCriteria {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self { category: Some(category.into()), ..Self::default() }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self { search: Some(query.into()), ..Self::default() }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// The trimmed search query, if non-empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// The trimmed category, if non-empty.
    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Handle for one issued reload; pass it back to [`ListEngine::finish_reload`].
#[derive(Debug)]
pub struct ReloadTicket {
    generation: u64,
    criteria: ListCriteria,
}

impl ReloadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn criteria(&self) -> &ListCriteria {
        &self.criteria
    }
}

/// What happened to a completed reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The result replaced the engine state.
    Applied { fetched: usize },
    /// A newer reload was issued meanwhile; the result was discarded.
    Stale,
}

/// Fetches the collection `criteria` asks for: search, then category, then everything.
pub async fn fetch<C: CatalogSource + ?Sized>(
    client: &C,
    criteria: &ListCriteria,
) -> Result<Vec<Product>> {
    if let Some(query) = criteria.search_term() {
        client.search(query).await
    } else if let Some(category) = criteria.category_slug() {
        client.products_by_category(category).await
    } else {
        client.all_products().await
    }
}

/// Clears the in-flight marker of an abandoned reload.
struct InFlightGuard<'a, C: CatalogSource + ?Sized> {
    engine: &'a mut ListEngine<C>,
    generation: u64,
}

impl<C: CatalogSource + ?Sized> Drop for InFlightGuard<'_, C> {
    fn drop(&mut self) {
        if self.engine.in_flight == Some(self.generation) {
            debug!("Reload #{} abandoned before completion", self.generation);
            self.engine.in_flight = None;
        }
    }
}

/// Client-side list state for one product listing.
pub struct ListEngine<C: CatalogSource + ?Sized> {
    client: Arc<C>,
    page_size: usize,
    filters: FilterChain,
    criteria: ListCriteria,
    full_result: Vec<Product>,
    view: Vec<Product>,
    query: String,
    sort: Option<SortOrder>,
    page_count: usize,
    generation: u64,
    in_flight: Option<u64>,
    error: Option<String>,
}

impl<C: CatalogSource + ?Sized> ListEngine<C> {
    /// Creates an empty engine with the default page size.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    /// Creates an empty engine. A page size of zero is bumped to one.
    pub fn with_page_size(client: Arc<C>, page_size: usize) -> Self {
        Self {
            client,
            page_size: page_size.max(1),
            filters: FilterChain::new(),
            criteria: ListCriteria::default(),
            full_result: Vec::new(),
            view: Vec::new(),
            query: String::new(),
            sort: None,
            page_count: 1,
            generation: 0,
            in_flight: None,
            error: None,
        }
    }

    /// Adds local facet filters applied together with the query.
    pub fn with_filters(mut self, filters: FilterChain) -> Self {
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }
        self.filters = filters;
        self.recompute();
        self
    }

    /// Fetches according to `criteria` and replaces the result.
    ///
    /// On failure the window is emptied, the error message is kept in
    /// [`error`](Self::error) and the error is returned.
    ///
    /// Dropping the returned future mid-fetch (e.g. on a timeout) abandons the
    /// reload: the engine stops reporting it as loading and keeps its state.
    pub async fn reload(&mut self, criteria: ListCriteria) -> Result<ReloadOutcome> {
        let ticket = self.begin_reload(criteria);
        let mut guard = InFlightGuard { generation: ticket.generation, engine: self };
        let outcome = fetch(guard.engine.client.as_ref(), &ticket.criteria).await;
        guard.engine.finish_reload(ticket, outcome)
    }

    /// Reloads with the current criteria.
    pub async fn refresh(&mut self) -> Result<ReloadOutcome> {
        let criteria = self.criteria.clone();
        self.reload(criteria).await
    }

    /// Reloads the given category, dropping any search.
    pub async fn select_category(&mut self, category: impl Into<String>) -> Result<ReloadOutcome> {
        let criteria = ListCriteria { category: Some(category.into()), sort: None, search: None };
        self.reload(criteria).await
    }

    /// Runs a server-side search. The local query is cleared so the server's
    /// matches are not narrowed again by title.
    pub async fn submit_query(&mut self, text: impl Into<String>) -> Result<ReloadOutcome> {
        self.query.clear();
        let criteria = ListCriteria {
            category: self.criteria.category.clone(),
            sort: None,
            search: Some(text.into()),
        };
        self.reload(criteria).await
    }

    /// Issues a new reload generation and marks it in flight.
    pub fn begin_reload(&mut self, criteria: ListCriteria) -> ReloadTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.error = None;
        debug!("Reload #{} issued: {:?}", self.generation, criteria);
        ReloadTicket { generation: self.generation, criteria }
    }

    /// Applies a fetch outcome if `ticket` is still the latest reload.
    pub fn finish_reload(
        &mut self,
        ticket: ReloadTicket,
        outcome: Result<Vec<Product>>,
    ) -> Result<ReloadOutcome> {
        if ticket.generation != self.generation {
            warn!(
                "Discarding stale reload #{} (latest is #{})",
                ticket.generation, self.generation
            );
            return Ok(ReloadOutcome::Stale);
        }

        self.in_flight = None;
        self.criteria = ticket.criteria;
        self.page_count = 1;

        match outcome {
            Ok(products) => {
                let fetched = products.len();
                if let Some(sort) = self.criteria.sort {
                    self.sort = Some(sort);
                }
                self.full_result = products;
                self.error = None;
                self.recompute();
                info!("Loaded {} products ({} after filtering)", fetched, self.view.len());
                Ok(ReloadOutcome::Applied { fetched })
            }
            Err(e) => {
                warn!("Reload failed: {}", e);
                self.full_result.clear();
                self.view.clear();
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Reveals one more page. Returns false when nothing changed: a reload
    /// is in flight or the window already covers every match.
    pub fn load_more(&mut self) -> bool {
        if self.in_flight.is_some() {
            debug!("load_more ignored: reload in flight");
            return false;
        }
        if !self.has_more() {
            return false;
        }

        self.page_count += 1;
        debug!("Page {} ({} of {} visible)", self.page_count, self.visible().len(), self.view.len());
        true
    }

    /// Sets the local title query. Never fetches.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.recompute();
    }

    /// Changes the sort. The page count is kept.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = Some(sort);
        self.recompute();
    }

    /// Returns to fetch order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.recompute();
    }

    /// The visible window.
    pub fn visible(&self) -> &[Product] {
        let len = self.page_count.saturating_mul(self.page_size).min(self.view.len());
        &self.view[..len]
    }

    /// The last successful fetch result, unfiltered and unsorted.
    pub fn full_result(&self) -> &[Product] {
        &self.full_result
    }

    /// Number of products matching the query and filters.
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    pub fn has_more(&self) -> bool {
        self.visible().len() < self.view.len()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn criteria(&self) -> &ListCriteria {
        &self.criteria
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Message of the last failed reload, cleared by the next successful one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn recompute(&mut self) {
        let query = QueryFilter::new(&self.query);
        let mut view: Vec<Product> = self
            .full_result
            .iter()
            .filter(|p| query.matches(p) && self.filters.matches(p))
            .cloned()
            .collect();

        if let Some(sort) = self.sort {
            sort.apply(&mut view);
        }

        self.view = view;
    }
}
