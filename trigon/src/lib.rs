//! # trigon
//!
//! A small, stateful render core for OpenGL 3.3, driving a family of incremental triangle
//! demos. The crate owns the GPU resource lifecycle (shader stages and programs, vertex
//! arrays and buffers, uniform uploads) together with the per-frame mutable state the demos
//! share (translation offsets driven by input).
//!
//! # Design
//!
//! The crate does not open windows nor create OpenGL contexts; that is the job of a surface
//! backend such as **trigon-glfw**. Once a context is current on the calling thread, build a
//! [`Gl33`] backend with [`Gl33::new`] and hand it to whatever drives the frame loop. All GL
//! calls are routed through a thread-local, cached graphics state so redundant state changes
//! are elided.
//!
//! # Error handling
//!
//! Shader compilation and program linking are deliberately *permissive*: failures are
//! collected as bounded diagnostics next to a still-usable (if broken) program object, and
//! it is up to the caller to log them and carry on. Drawing with an unlinked program is
//! allowed and renders nothing. Everything else, context acquisition and mesh construction
//! included, reports errors through dedicated types implementing [`std::error::Error`].

pub mod context;
pub mod gl33;
pub mod mesh;
pub mod shader;
pub mod state;
pub mod transform;
pub mod vertex;

pub use crate::context::GraphicsContext;
pub use crate::gl33::Gl33;
