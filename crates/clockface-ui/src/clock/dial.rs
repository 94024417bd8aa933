use clockface_engine::coords::Rect;
use clockface_engine::scene::{LineCap, Stroke, TextAnchor};
use clockface_engine::text::FontId;

use crate::clock::{ClockReading, ClockStyle, DialGeometry};
use crate::painter::Painter;

pub const HOUR_HAND_FRACTION: f32 = 0.5;
pub const MINUTE_HAND_FRACTION: f32 = 0.7;
pub const SECOND_HAND_FRACTION: f32 = 1.0;

const HOUR_TICK_INNER: f32 = 0.9;
const MINUTE_TICK_INNER: f32 = 0.95;
const LABEL_FRACTION: f32 = 0.7;

/// Paints one full clock face into `rect`.
///
/// Paint order, back to front:
/// 1. dial circle
/// 2. twelve hour ticks, each followed by its numeral
/// 3. sixty minute ticks
/// 4. hour, minute and second hands
/// 5. center dot
///
/// Returns `false` without recording anything when the dial radius is not
/// positive.
pub fn paint_clock(
    painter: &mut Painter<'_>,
    rect: Rect,
    reading: ClockReading,
    style: &ClockStyle,
    font: FontId,
) -> bool {
    let dial = DialGeometry::from_rect(rect, style.dial_width);
    if !dial.is_drawable() {
        return false;
    }

    painter.stroke_circle(dial.center, dial.radius, Stroke::new(style.dial_width, style.dial_color));

    for hour in 1..=12u32 {
        let angle = hour as f32 * 30.0;
        painter.line(
            dial.point_at(angle, HOUR_TICK_INNER),
            dial.point_at(angle, 1.0),
            style.hour_tick_width,
            style.dial_color,
            LineCap::Butt,
        );
        painter.text(
            hour.to_string(),
            font,
            style.label_size,
            style.label_color,
            dial.point_at(angle, LABEL_FRACTION),
            TextAnchor::Baseline,
        );
    }

    for minute in 1..=60u32 {
        let angle = minute as f32 * 6.0;
        painter.line(
            dial.point_at(angle, MINUTE_TICK_INNER),
            dial.point_at(angle, 1.0),
            style.minute_tick_width,
            style.dial_color,
            LineCap::Butt,
        );
    }

    let hands = [
        (reading.hour_deg, HOUR_HAND_FRACTION, style.hour),
        (reading.minute_deg, MINUTE_HAND_FRACTION, style.minute),
        (reading.second_deg, SECOND_HAND_FRACTION, style.second),
    ];
    for (angle, fraction, hand) in hands {
        painter.line(dial.center, dial.point_at(angle, fraction), hand.width, hand.color, LineCap::Butt);
    }

    painter.point(dial.center, style.dot_width, style.dial_color);
    true
}
