//! Snek (workspace facade crate).
//!
//! Re-exports the workspace crates as `snek::{core, render, host, input, term, types}`
//! so tools, tests and benches depend on one package.

pub use snek_core as core;
pub use snek_host as host;
pub use snek_input as input;
pub use snek_render as render;
pub use snek_term as term;
pub use snek_types as types;
