//! File-backed care log store: YAML profiles and per-cat CSV logs.

pub mod care_log_repository;
pub mod cat_repository;
pub mod connection;

#[cfg(test)]
pub mod test_utils;

pub use care_log_repository::CareLogRepository;
pub use cat_repository::CatRepository;
pub use connection::CsvConnection;
