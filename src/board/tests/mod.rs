//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Leaf counts against known positions
//! - `draw.rs` - Stalemate, 50-move and insufficient material
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests over random games

mod proptest;
