pub mod service;
pub mod tick;
