pub mod analyzers;
pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod html;
pub mod pipeline;
pub mod processing;
pub mod processing_client;
pub mod rate_limit;
pub mod rest;
pub mod tasks;
pub mod worker_pool;
