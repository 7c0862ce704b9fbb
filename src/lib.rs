pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod text;
pub mod util;
