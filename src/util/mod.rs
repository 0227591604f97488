// src/util/mod.rs
//! Small generic helpers. Empty input yields `None`, never a panic.

pub mod array;
pub mod containers;
pub mod strings;

pub use array::{average, dedup_by_key, filter_by, find_max, unique_elements};
pub use containers::{Queue, Stack};
pub use strings::is_palindrome;
