pub mod analysis;
pub mod app;
pub mod cmd;
pub mod config;
pub mod error;
pub mod host;
pub mod labels;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod resource;
