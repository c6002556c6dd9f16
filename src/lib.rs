pub mod cli;
pub mod community;
pub mod config;
pub mod error;
pub mod exit;
pub mod export;
pub mod generate;
pub mod graph;
pub mod ingest;
pub mod layout;
pub mod progress;
pub mod rank;
