// src/application/mod.rs
pub mod dto;
pub mod service;
