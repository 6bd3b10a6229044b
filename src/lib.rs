pub mod api;
pub mod capture;
pub mod cdx;
pub mod config;
pub mod data_models;
pub mod error;
pub mod extract;
pub mod search;
