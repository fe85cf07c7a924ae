pub mod care_log_mapper;
pub mod cat_mapper;
