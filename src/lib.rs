pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod logger;
pub mod models;
pub mod playback;
