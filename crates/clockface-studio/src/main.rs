use anyhow::Context;

use clockface_engine::logging::{init_logging, LoggingConfig};
use clockface_ui::prelude::*;

const STYLE_SHEET: &str = include_str!("../ui/clock.style");

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let style = ClockStyle::parse(STYLE_SHEET, CLOCK_BLOCK).context("invalid clock style sheet")?;
    log::info!("clock in {} refreshing every {:?}", style.time_zone, style.refresh);

    let font = load_font();
    if font.is_empty() {
        log::warn!("no system font found; hour labels will not render");
    }

    Application::new()
        .title("Clockface")
        .size(600.0, 600.0)
        .font("body", font)
        .background(Color::white())
        .try_run_widget(move |fonts| {
            let font = fonts.default_font().unwrap_or(FontId::new(0));
            ClockFace::with_zone(style, font).into()
        })
}

fn load_font() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sheet_is_valid() {
        let style = ClockStyle::parse(STYLE_SHEET, CLOCK_BLOCK).unwrap();
        assert_eq!(style, ClockStyle::default());
    }
}
