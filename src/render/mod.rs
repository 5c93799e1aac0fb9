//! Pixel-level rendering: buffers and scan conversion.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::FrameBuffer;
pub use renderer::Renderer;
