pub mod asset_chart;
pub mod asset_table;
pub mod dashboard;
pub mod filters;
