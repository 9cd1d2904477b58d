use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading-day observation for a ticker, as served by `/api/assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: i64,
    pub ticker: String,
    pub data_pregao: NaiveDate,
    pub preco_abertura: f64,
    pub preco_min: f64,
    pub preco_max: f64,
    pub preco_ultimo: f64,
    pub quantidade_negociada: f64,
}

/// One page of records plus the total count across every page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetPage {
    #[serde(default)]
    pub content: Vec<AssetRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
}

impl AssetPage {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// User-selected filters. Absent fields are never sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub ticker: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new(
        ticker: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Self {
        let ticker = ticker
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            ticker,
            start_date,
            end_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ticker.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }

    /// Query parameters for the present fields only, in `q`, `from`, `to` order.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(ticker) = &self.ticker {
            params.push(("q", ticker.clone()));
        }
        if let Some(start) = self.start_date {
            params.push(("from", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("to", end.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TickersResponse {
    #[serde(default)]
    pub tickers: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DatesResponse {
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_page_deserializes_from_sample() {
        let json = r#"{
            "content": [{
                "id": 1,
                "ticker": "PETR4",
                "data_pregao": "2024-11-18",
                "preco_abertura": 42.50,
                "preco_min": 42.10,
                "preco_max": 43.20,
                "preco_medio": 42.75,
                "preco_ultimo": 43.00,
                "quantidade_negociada": 15000000
            }],
            "total": 150,
            "page": 0,
            "size": 30,
            "total_pages": 5
        }"#;

        let page: AssetPage = serde_json::from_str(json).expect("valid page");
        assert_eq!(page.total, 150);
        assert_eq!(page.total_pages, Some(5));
        let record = &page.content[0];
        assert_eq!(record.ticker, "PETR4");
        assert_eq!(
            record.data_pregao,
            NaiveDate::from_ymd_opt(2024, 11, 18).unwrap()
        );
        assert_eq!(record.quantidade_negociada, 15_000_000.0);
    }

    #[test]
    fn only_present_criteria_become_params() {
        let criteria = FilterCriteria::new(
            Some("  ".into()),
            NaiveDate::from_ymd_opt(2024, 1, 1),
            None,
        );
        assert_eq!(
            criteria.query_params(),
            vec![("from", "2024-01-01".to_string())]
        );
        assert!(FilterCriteria::default().query_params().is_empty());
    }
}
