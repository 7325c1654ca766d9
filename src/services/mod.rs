// src/services/mod.rs

pub mod export;
pub mod leaderboard;
pub mod scoring;
