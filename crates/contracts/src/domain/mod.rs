pub mod common;

pub mod a001_complex;
pub mod a002_apartment;
pub mod a003_apartment_status_log;
pub mod a004_favorite;
pub mod a005_saved_search;
