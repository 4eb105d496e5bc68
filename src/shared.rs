pub mod error;
pub mod events;
pub mod languages;
pub mod settings;
pub mod types;

#[cfg(test)]
mod types_test;
