//! Fitware Console Library
//!
//! Administrative console for the Fitware coaching API: resource clients,
//! page view-controllers and the navigation table.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;
