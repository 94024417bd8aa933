use std::time::{Duration, Instant};

use clockface_engine::coords::Vec2;
use clockface_engine::paint::Color;
use clockface_engine::scene::{DrawCmd, DrawList, LineCap, Stroke, TextAnchor, ZIndex};
use clockface_engine::text::FontId;
use clockface_engine::time::RepaintTimer;

#[test]
fn paint_order_is_z_then_insertion() {
    let mut list = DrawList::new();
    let c = Vec2::new(50.0, 50.0);

    list.push_point(ZIndex::new(2), c, 30.0, Color::black());
    list.push_stroke_circle(ZIndex::new(0), c, 40.0, Stroke::new(10.0, Color::black()));
    list.push_line(ZIndex::new(1), c, Vec2::new(50.0, 10.0), 5.0, Color::black(), LineCap::Butt);
    list.push_text(
        ZIndex::new(1),
        "12",
        FontId::new(0),
        40.0,
        Color::black(),
        Vec2::new(45.0, 22.0),
        TextAnchor::Baseline,
    );

    let kinds: Vec<&str> = list
        .iter_in_paint_order()
        .map(|item| match &item.cmd {
            DrawCmd::Circle(_) => "circle",
            DrawCmd::Line(l) if l.cap == LineCap::Round => "dot",
            DrawCmd::Line(_) => "line",
            DrawCmd::Text(_) => "text",
        })
        .collect();
    assert_eq!(kinds, ["circle", "line", "text", "dot"]);

    list.clear();
    assert!(list.is_empty());
}

#[test]
fn timer_fires_once_per_arm() {
    let t0 = Instant::now();
    let period = Duration::from_millis(1000);
    let mut timer = RepaintTimer::new(period);

    assert!(timer.arm(t0));
    assert!(!timer.arm(t0 + Duration::from_millis(10)));
    assert_eq!(timer.pending(), 1);

    let mut now = t0;
    for tick in 1..=3 {
        now += period;
        assert!(timer.poll(now));
        assert!(!timer.poll(now));
        assert_eq!(timer.fire_count(), tick);
        assert!(timer.arm(now));
    }

    assert!(timer.cancel());
    assert!(!timer.poll(now + period * 5));
    assert_eq!(timer.pending(), 0);
    assert_eq!(timer.fire_count(), 3);
}
