//! Heart Greeting library - interactive heart, confetti and hidden message

pub mod activation;
pub mod app;
pub mod config;
pub mod confetti;
pub mod event;
pub mod geometry;
pub mod heart;
pub mod perishable;
pub mod random;
pub mod stars;
pub mod tilt;
pub mod timer;
