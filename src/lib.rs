pub mod app;
pub mod chat;
pub mod core;
pub mod debug;
pub mod field;
pub mod interaction;
pub mod rendering;

// Curated re-exports
pub use crate::app::intro::IntroPlugin;
pub use crate::chat::provider::{Speaker, Turn};
pub use crate::core::components::{Agent, Particle};
pub use crate::core::config::{config::WindowConfig, IntroConfig};
