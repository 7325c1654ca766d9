// src/models/mod.rs

pub mod action;
pub mod form;
pub mod leaderboard;
pub mod phishing;
pub mod submission;
