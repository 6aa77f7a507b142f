pub mod config;
pub mod models;

mod collector;
mod collectors;
mod renderer;

pub mod poller;
pub mod session;
pub mod store;
pub mod visualize;
