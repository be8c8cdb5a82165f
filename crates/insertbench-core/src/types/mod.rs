//! Domain types shared across crates.

pub mod record;
