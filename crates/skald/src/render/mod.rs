//! GPU plumbing shared by the concrete backend.

pub mod gpu;

pub use gpu::GpuContext;
