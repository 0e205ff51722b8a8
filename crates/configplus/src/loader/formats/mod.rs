//! Document format parsers

pub mod yaml;
