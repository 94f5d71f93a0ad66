//! Pieces shared by the leave and overtime request pages.

pub mod components;
pub mod repository;
pub mod types;
pub mod utils;
