//! REST API server for the sales analytics dashboard.

pub mod rest;
pub mod server;
pub mod swagger;

pub use server::ApiServer;
