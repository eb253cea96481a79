//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window management and pointer forwarding
//! - `renderer` - softbuffer surface and back buffer

pub mod app;
pub mod renderer;

pub use app::App;
