//! Roster GUI Client Library
//!
//! A resilient, virtualized player list: classified load errors, retry with
//! backoff, a last-good cache, client-side search/filter/sort and a windowed
//! row renderer.

pub mod app;
pub mod components;
pub mod constants;
pub mod domain;
pub mod error;
pub mod features;
pub mod i18n;
pub mod list;
pub mod loader;
pub mod services;
pub mod theme;
pub mod utils;
