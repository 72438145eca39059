pub mod models;
pub mod services;
pub mod sheets;
pub mod web;
