// src/handlers/mod.rs

pub mod actions;
pub mod admin;
pub mod leaderboard;
pub mod phishing;
pub mod submissions;
