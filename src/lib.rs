pub mod cli;
pub mod client;
pub mod config;
pub mod content;
pub mod models;
pub mod server;
pub mod site;
pub mod storage;
