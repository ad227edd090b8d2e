#![forbid(unsafe_code)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod contents;
pub mod dom;
pub mod fetch;
pub mod formats;
pub mod label;
pub mod logging;
pub mod record;
pub mod saints;
pub mod scrape;
pub mod title;
