// src/core/mod.rs

pub mod cache;
pub mod combiner;
pub mod engine;
pub mod pool;
pub mod tokenizer;
pub mod types;
