//! GPU device + surface management.
//!
//! [`Gpu`] owns the wgpu device, queue and the window surface. Frames are
//! acquired with [`Gpu::begin_frame`] and presented with [`Gpu::submit`].

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
