//! Depth-first document traversal and extraction visitors.

pub mod engine;
pub mod visitor;
