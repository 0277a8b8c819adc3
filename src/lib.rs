pub mod classifier;
pub mod config;
pub mod context;
pub mod engine;
pub mod output;
pub mod reference;
pub mod server;
