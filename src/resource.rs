//! Resource declarations (data) and the table that names them.
//!
//! `declaration` holds the per-endpoint triple of HTTP method, URL template, and optional
//! argument rules. `table` maps resource names to declarations and validates their shape once,
//! at load time, so a malformed entry never surfaces in the middle of a call.

pub mod declaration;
pub mod table;

pub use declaration::*;
pub use table::*;
