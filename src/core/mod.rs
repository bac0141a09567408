pub mod app;
pub mod config;
pub mod menu;
pub mod paths;
pub mod presentation;
pub mod relay_client;
pub mod segment;
pub mod thread;
