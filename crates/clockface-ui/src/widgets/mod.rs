pub mod clock_face;

pub use clock_face::ClockFace;
