//! Command implementations for the tcoll CLI.

pub mod check;
pub mod keys;
pub mod lookup;
pub mod sort;
