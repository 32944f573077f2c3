//! Test support for the STX workspace.
//!
//! [`encode`] writes protocol values back to bytes using the same layouts
//! the decoders read, so integration tests and benches can build inputs
//! from typed values instead of hand-assembled byte strings. [`fixtures`]
//! holds ready-made values for the common cases.

#![allow(clippy::pedantic)]

pub mod encode;
pub mod fixtures;
