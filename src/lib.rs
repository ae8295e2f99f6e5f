//! Higher or Lower (workspace facade crate).
//!
//! Re-exports the workspace crates as `higher_lower::{core, adapter, term, input, types}`
//! so the binary, integration tests and benches share one import path.

pub use higher_lower_adapter as adapter;
pub use higher_lower_core as core;
pub use higher_lower_input as input;
pub use higher_lower_term as term;
pub use higher_lower_types as types;
