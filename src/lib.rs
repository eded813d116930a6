pub mod api;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod location;
pub mod pricing;
pub mod selector;
pub mod server;
