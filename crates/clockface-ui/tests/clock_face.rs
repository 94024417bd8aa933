use std::time::{Duration, Instant};

use clockface_engine::coords::Viewport;
use clockface_engine::scene::{DrawCmd, DrawKind, LineCap, TextAnchor};
use clockface_ui::prelude::*;

fn face_at(h: u32, m: u32, s: u32) -> Element {
    let source = FixedClock::hms(h, m, s).unwrap();
    ClockFace::new(ClockStyle::default(), source, FontId::new(0)).into()
}

fn close(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

#[test]
fn three_oclock_hands() {
    let mut scene = UiScene::new();
    let root = face_at(3, 0, 0);
    let list = scene.frame_ref(&root, Viewport::new(600.0, 600.0), 1.0);

    let hands: Vec<_> = list
        .items()
        .iter()
        .filter_map(|i| i.cmd.as_line())
        .filter(|l| l.cap == LineCap::Butt && l.from == Vec2::new(300.0, 300.0))
        .collect();
    assert_eq!(hands.len(), 3);

    // radius = 600 / 2 - 10 * 10 = 200
    assert!(close(hands[0].to, Vec2::new(400.0, 300.0)));
    assert!(close(hands[1].to, Vec2::new(300.0, 160.0)));
    assert!(close(hands[2].to, Vec2::new(300.0, 100.0)));
}

#[test]
fn hands_compose_over_the_numerals() {
    let mut scene = UiScene::new();
    let root = face_at(3, 0, 0);
    let list = scene.frame_ref(&root, Viewport::new(600.0, 600.0), 1.0);

    let center = Vec2::new(300.0, 300.0);
    let is_hand =
        |cmd: &DrawCmd| cmd.as_line().is_some_and(|l| l.cap == LineCap::Butt && l.from == center);
    let top_label = list.items().iter().filter(|i| i.cmd.as_text().is_some()).map(|i| i.z).max();
    let lowest_hand = list.items().iter().filter(|i| is_hand(&i.cmd)).map(|i| i.z).min();
    assert!(top_label.unwrap() < lowest_hand.unwrap());

    // Renderers draw run by run, so every numeral run must precede the hands.
    let runs = list.runs();
    let mut expected = vec![DrawKind::Circle];
    for _ in 0..12 {
        expected.extend([DrawKind::Line, DrawKind::Text]);
    }
    expected.push(DrawKind::Line);
    assert_eq!(runs.iter().map(|r| r.kind).collect::<Vec<_>>(), expected);

    // 60 minute ticks, 3 hands, center dot
    let last = runs.last().unwrap();
    assert_eq!(last.items.len(), 64);
    assert_eq!(last.cmds().filter(|c| is_hand(*c)).count(), 3);
}

#[test]
fn draw_census() {
    let mut scene = UiScene::new();
    let root = face_at(7, 45, 12);
    let list = scene.frame_ref(&root, Viewport::new(640.0, 480.0), 2.0);

    let mut circles = 0;
    let mut butt = 0;
    let mut round = 0;
    let mut labels = Vec::new();
    for item in list.items() {
        match &item.cmd {
            DrawCmd::Circle(_) => circles += 1,
            DrawCmd::Line(l) if l.cap == LineCap::Butt => butt += 1,
            DrawCmd::Line(_) => round += 1,
            DrawCmd::Text(t) => {
                assert_eq!(t.anchor, TextAnchor::Baseline);
                assert_eq!(t.size, 40.0);
                labels.push(t.text.clone());
            }
        }
    }

    assert_eq!(circles, 1);
    assert_eq!(butt, 12 + 60 + 3);
    assert_eq!(round, 1);
    assert_eq!(labels.len(), 12);
    assert_eq!(labels.first().map(String::as_str), Some("1"));
    assert_eq!(labels.last().map(String::as_str), Some("12"));
}

#[test]
fn twelve_label_sits_above_center() {
    let mut scene = UiScene::new();
    let root = face_at(0, 0, 0);
    let list = scene.frame_ref(&root, Viewport::new(600.0, 600.0), 1.0);

    let twelve = list
        .items()
        .iter()
        .filter_map(|i| i.cmd.as_text())
        .find(|t| t.text == "12")
        .unwrap();
    // 0.7 * 200 above the center
    assert!(close(twelve.origin, Vec2::new(300.0, 160.0)));
}

#[test]
fn too_small_window_draws_nothing() {
    let mut scene = UiScene::new();
    let root = face_at(1, 1, 1);
    assert!(scene.frame_ref(&root, Viewport::new(200.0, 600.0), 1.0).is_empty());
}

#[test]
fn one_deadline_across_repaints() {
    let t0 = Instant::now();
    let mut scene = UiScene::new();
    let mut root = face_at(10, 10, 10);

    root.on_attach(t0);
    let first = root.next_deadline();
    assert_eq!(first, Some(t0 + Duration::from_secs(1)));

    for _ in 0..5 {
        let _ = scene.frame_ref(&root, Viewport::new(600.0, 600.0), 1.0);
    }
    assert_eq!(root.next_deadline(), first);

    // A second attach does not stack another deadline.
    root.on_attach(t0 + Duration::from_millis(300));
    assert_eq!(root.next_deadline(), first);

    let t1 = t0 + Duration::from_secs(1);
    assert!(root.poll(t1));
    assert!(!root.poll(t1));
    assert_eq!(root.next_deadline(), Some(t1 + Duration::from_secs(1)));

    root.on_detach();
    assert_eq!(root.next_deadline(), None);
    assert!(!root.poll(t1 + Duration::from_secs(10)));
}

#[test]
fn refresh_period_comes_from_style() {
    let style = ClockStyle::parse("Clock { refresh_ms: 250 }", CLOCK_BLOCK).unwrap();
    let source = FixedClock::hms(0, 0, 0).unwrap();
    let mut root: Element = ClockFace::new(style, source, FontId::new(0)).into();

    let t0 = Instant::now();
    root.on_attach(t0);
    assert_eq!(root.next_deadline(), Some(t0 + Duration::from_millis(250)));
}
