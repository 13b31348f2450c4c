// src/infrastructure/mod.rs
pub mod repository;
pub mod storage;
