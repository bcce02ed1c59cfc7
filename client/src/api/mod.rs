//! Backend API integration

pub mod stock_api;

pub use stock_api::StockApiClient;
