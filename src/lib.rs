pub mod app;
pub mod assistant;
pub mod config;
pub mod routing;
pub mod shared;
