//! Roster Feature
//!
//! The player list page and the controller that drives its loader.

pub mod controller;
pub mod page;
pub mod row;

pub use controller::{LoaderOp, RosterController};
pub use page::RosterPage;
