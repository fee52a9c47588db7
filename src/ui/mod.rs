//! User interface layer.
//!
//! Everything that touches the real terminal lives here; the `core`
//! modules stay free of crossterm so they can be tested headlessly.

pub mod renderer;

pub use renderer::Renderer;
