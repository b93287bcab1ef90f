pub mod a001_complex;
pub mod a002_apartment;
pub mod a004_favorite;
pub mod a005_saved_search;
pub mod logs;
pub mod system_users;
