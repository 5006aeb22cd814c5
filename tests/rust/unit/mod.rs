//! Unit tests - public API behaviour without any GraphQL server
//!
//! Compile chains, shape canned responses, and load catalogs from files.

mod catalog_file_tests;
mod compile_property_tests;
mod flat_shaping_tests;
