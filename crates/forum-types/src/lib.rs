pub mod api;
pub mod models;
pub mod timestamp;
pub mod validation;
