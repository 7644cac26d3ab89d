// src/models/mod.rs

pub mod catalog;
pub mod question;
pub mod result;
pub mod session;
pub mod timing;
