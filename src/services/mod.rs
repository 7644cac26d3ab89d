// src/services/mod.rs

pub mod analytics;
pub mod scoring;
pub mod sessions;
pub mod test_runner;
