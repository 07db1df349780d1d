//! Slabs (workspace facade crate).
//!
//! Re-exports the engine, persistence and shared types under one name so
//! hosts can depend on a single package while the implementation lives in
//! dedicated crates under `crates/`.

pub use slabs_core as core;
pub use slabs_store as store;
pub use slabs_types as types;
