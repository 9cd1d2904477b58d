use crate::config::DEFAULT_PAGE_SIZE;

use super::error::ApiError;
use super::types::{AssetPage, AssetRecord, FilterCriteria};

/// A fetch the shell must run. `generation` identifies it when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub criteria: FilterCriteria,
    pub page: u32,
    pub page_size: u32,
}

/// What the dashboard body should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentView {
    Loading,
    Results { show_chart: bool },
}

/// Single owner of the dashboard view state. Every mutation is a named transition;
/// the ones touching criteria or pagination hand back a [`FetchTicket`].
#[derive(Debug, Clone)]
pub struct DashboardState {
    criteria: FilterCriteria,
    page: u32,
    page_size: u32,
    result: Option<AssetPage>,
    loading: bool,
    error: Option<String>,
    api_healthy: bool,
    generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl DashboardState {
    pub fn new(page_size: u32) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 0,
            page_size: page_size.max(1),
            result: None,
            loading: false,
            error: None,
            api_healthy: true,
            generation: 0,
        }
    }

    /// Mark a fetch in flight for the current criteria and pagination.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            generation: self.generation,
            criteria: self.criteria.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }

    /// Apply a finished fetch. Returns `false` when a newer fetch superseded it.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        outcome: Result<AssetPage, ApiError>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "discarding stale response generation={generation} latest={}",
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(page) => self.result = Some(page),
            Err(err) => self.error = Some(err.to_string()),
        }
        self.loading = false;
        true
    }

    pub fn apply_filters(&mut self, criteria: FilterCriteria) -> FetchTicket {
        self.criteria = criteria;
        self.page = 0;
        self.begin_fetch()
    }

    pub fn change_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.begin_fetch())
    }

    pub fn change_page_size(&mut self, page_size: u32) -> Option<FetchTicket> {
        let page_size = page_size.max(1);
        if page_size == self.page_size && self.page == 0 {
            return None;
        }
        self.page_size = page_size;
        self.page = 0;
        Some(self.begin_fetch())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn set_api_health(&mut self, healthy: bool) {
        self.api_healthy = healthy;
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn result(&self) -> Option<&AssetPage> {
        self.result.as_ref()
    }

    pub fn records(&self) -> &[AssetRecord] {
        self.result
            .as_ref()
            .map(|page| page.content.as_slice())
            .unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.result.as_ref().map(|page| page.total).unwrap_or(0)
    }

    pub fn has_records(&self) -> bool {
        !self.records().is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn api_healthy(&self) -> bool {
        self.api_healthy
    }

    pub fn content_view(&self) -> ContentView {
        if self.loading {
            ContentView::Loading
        } else {
            ContentView::Results {
                show_chart: self.has_records(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sample_page(count: usize, total: u64) -> AssetPage {
        let content = (0..count)
            .map(|index| AssetRecord {
                id: index as i64,
                ticker: "PETR4".into(),
                data_pregao: NaiveDate::from_ymd_opt(2024, 1, 2 + index as u32).unwrap(),
                preco_abertura: 38.0,
                preco_min: 37.5,
                preco_max: 38.9,
                preco_ultimo: 38.4,
                quantidade_negociada: 1_000.0,
            })
            .collect();
        AssetPage {
            content,
            total,
            ..AssetPage::default()
        }
    }

    #[test]
    fn begin_fetch_sets_loading_and_clears_error() {
        let mut state = DashboardState::default();
        let first = state.begin_fetch();
        state.complete_fetch(
            first.generation,
            Err(ApiError::NoResponse {
                cause: "offline".into(),
            }),
        );
        assert!(state.error().is_some());

        let ticket = state.begin_fetch();
        assert!(state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(ticket.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.content_view(), ContentView::Loading);
    }

    #[test]
    fn filters_reset_page_and_always_fetch() {
        let mut state = DashboardState::default();
        state.change_page(3);
        let criteria = FilterCriteria::new(Some("VALE3".into()), None, None);

        let ticket = state.apply_filters(criteria.clone());
        assert_eq!(state.page(), 0);
        assert_eq!(ticket.page, 0);
        assert_eq!(ticket.criteria, criteria);

        let again = state.apply_filters(criteria);
        assert!(again.generation > ticket.generation);
    }

    #[test]
    fn page_change_keeps_filters_and_size() {
        let mut state = DashboardState::new(50);
        let criteria = FilterCriteria::new(Some("ITUB4".into()), None, None);
        state.apply_filters(criteria.clone());

        let ticket = state.change_page(2).expect("page changed");
        assert_eq!(ticket.page, 2);
        assert_eq!(state.page_size(), 50);
        assert_eq!(state.criteria(), &criteria);
        assert!(state.change_page(2).is_none());
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut state = DashboardState::default();
        state.change_page(4);

        let ticket = state.change_page_size(100).expect("size changed");
        assert_eq!(ticket.page, 0);
        assert_eq!(ticket.page_size, 100);
        assert!(state.change_page_size(100).is_none());

        state.change_page(1);
        let same_size = state.change_page_size(100).expect("page reset");
        assert_eq!(same_size.page, 0);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = DashboardState::default();
        let older = state.begin_fetch();
        let newer = state.change_page(1).expect("page changed");

        assert!(state.complete_fetch(newer.generation, Ok(sample_page(2, 40))));
        assert!(!state.complete_fetch(older.generation, Ok(sample_page(30, 999))));
        assert_eq!(state.total(), 40);
        assert_eq!(state.records().len(), 2);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_completion_keeps_loading_for_newer_fetch() {
        let mut state = DashboardState::default();
        let older = state.begin_fetch();
        let _newer = state.begin_fetch();

        state.complete_fetch(older.generation, Ok(sample_page(1, 1)));
        assert!(state.is_loading());
        assert!(state.result().is_none());
    }

    #[test]
    fn empty_result_hides_chart() {
        let mut state = DashboardState::default();
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(sample_page(0, 0)));
        assert_eq!(
            state.content_view(),
            ContentView::Results { show_chart: false }
        );

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(sample_page(3, 3)));
        assert_eq!(
            state.content_view(),
            ContentView::Results { show_chart: true }
        );
    }

    #[test]
    fn error_is_dismissible_and_keeps_previous_result() {
        let mut state = DashboardState::default();
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket.generation, Ok(sample_page(2, 2)));

        let ticket = state.change_page(1).expect("page changed");
        state.complete_fetch(
            ticket.generation,
            Err(ApiError::from_response(500, r#"{"detail":"boom"}"#)),
        );
        assert_eq!(state.error(), Some("boom"));
        assert_eq!(state.records().len(), 2);

        state.dismiss_error();
        assert!(state.error().is_none());
    }
}
