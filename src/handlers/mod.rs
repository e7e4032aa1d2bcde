pub mod api;
pub mod catalog;
pub mod health;
pub mod manage;
