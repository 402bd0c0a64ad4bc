pub mod config;
pub mod logging;

pub mod engine;
pub mod fetch;
pub mod request;
pub mod retry;
pub mod url_model;
