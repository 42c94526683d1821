//! Message handlers, grouped by the panel they serve.

pub mod archive;
pub mod attack;
pub mod browse;
pub mod compress;
pub mod helpers;
pub mod keys;
pub mod tools;
