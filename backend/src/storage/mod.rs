//! # Storage Module
//!
//! Handles all data persistence for the cat care tracker.
//!
//! The domain layer only sees the [`CatStorage`] and [`CareLogStorage`]
//! traits. The current implementation keeps one directory per cat:
//!
//! ```text
//! <data_dir>/cats/<cat_id>/cat.yaml   profile
//! <data_dir>/cats/<cat_id>/logs.csv   care logs, append order
//! ```
//!
//! The per-cat directory doubles as the "logs by cat" index.

pub mod csv;
pub mod traits;

pub use csv::{CareLogRepository, CatRepository, CsvConnection};
pub use traits::{CareLogStorage, CatStorage};
