// src/adapter/mod.rs
pub mod container;

pub use container::AppContainer;
