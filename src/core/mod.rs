// src/core/mod.rs

pub mod arguments;
pub mod context;
pub mod manifest;
pub mod tasks;
