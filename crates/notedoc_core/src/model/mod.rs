//! Domain model for document trees and extracted content items.

pub mod item;
pub mod node;
