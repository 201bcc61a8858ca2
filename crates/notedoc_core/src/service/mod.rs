//! Use-case services orchestrating validation, extraction, grouping
//! and synthesis.

pub mod todo_service;
