// src/document/mod.rs
pub mod models;
pub mod source;
mod text_layout;
