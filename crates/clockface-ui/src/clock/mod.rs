//! Analog clock face: time sampling, dial geometry, styling and painting.
//!
//! Everything here is display-free. [`paint_clock`] turns a reading, a rect
//! and a style into draw commands; the [`ClockFace`](crate::widgets::ClockFace)
//! widget adds the repaint timer around it.

mod dial;
mod geometry;
mod reading;
mod style;

pub use dial::{paint_clock, HOUR_HAND_FRACTION, MINUTE_HAND_FRACTION, SECOND_HAND_FRACTION};
pub use geometry::DialGeometry;
pub use reading::{ClockReading, FixedClock, TimeSource, ZonedClock};
pub use style::{ClockStyle, HandStyle, StyleError, CLOCK_BLOCK};
