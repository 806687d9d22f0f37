//! Tetrino (workspace facade crate).
//!
//! Exposes `tetrino::{core,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use tetrino_core as core;
pub use tetrino_types as types;
