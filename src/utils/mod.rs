// src/utils/mod.rs

pub mod dispatch;
