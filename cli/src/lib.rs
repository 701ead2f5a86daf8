//! wayfinder CLI: route queries over a JSON graph store.
//!
//! Each subcommand loads the store into memory, runs its queries and
//! returns the report text; `main` only prints.

pub mod route;
pub mod settings;
pub mod status;
