pub mod care_log;
pub mod cat;
