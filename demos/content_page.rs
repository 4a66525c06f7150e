//! pagekit demo - a content page with all three widgets
//!
//! Usage: content_page [BEFORE_IMAGE AFTER_IMAGE]
//! Without arguments two generated gradients are compared.
//! Logs go to stderr; redirect them (`2>page.log`) and set `RUST_LOG=pagekit=debug`.

use anyhow::Result;
use image::{Rgba, RgbaImage};
use pagekit::{
    component::Component,
    components::{Image, Stack, Text, TextRole},
    context::RenderContext,
    event::{Event, EventHandler, EventPoller, Key},
    layout::Rect,
    ComparisonSlider, ExpandableSection, QuickQuiz, Renderer, Theme,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn gradient(width: u32, height: u32, from: [u8; 3], to: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let t = x as f32 / width.max(1) as f32;
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Rgba([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2]), 255])
    })
}

fn build_page() -> Stack {
    let mut args = std::env::args().skip(1);
    let slider = match (args.next(), args.next()) {
        (Some(before), Some(after)) => {
            ComparisonSlider::new(before, after, "Before and after", "Before", "After")
        }
        _ => ComparisonSlider::with_images(
            Image::from_rgba(gradient(160, 80, [30, 30, 90], [90, 160, 255])),
            Image::from_rgba(gradient(160, 80, [90, 30, 30], [255, 190, 90])),
            "Cool versus warm",
            "Cool",
            "Warm",
        ),
    };

    let section = ExpandableSection::new(
        "How the comparison works",
        "Drag the control under the images, or focus the slider with Tab and use \
         the arrow keys. The left picture fills everything left of the divider and \
         the right picture fills the rest.",
    );

    let quiz = QuickQuiz::new(
        "Which side shows the warm palette?",
        ["The left side", "The right side", "Neither"],
        1,
    )
    .with_explanation("The right image runs from deep red to orange.");

    Stack::new()
        .with_gap(1)
        .with_child(Box::new(Text::heading("pagekit")))
        .with_child(Box::new(slider))
        .with_child(Box::new(section))
        .with_child(Box::new(quiz))
        .with_child(Box::new(
            Text::new("Tab: next widget   q: quit").with_role(TextRole::Muted),
        ))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut renderer = Renderer::new()?;
    let theme = Theme::new(renderer.context().capabilities);
    let ctx = RenderContext::new(&theme);

    renderer.enter_alt_screen()?;
    renderer.hide_cursor()?;
    renderer.clear()?;

    let events = EventPoller::new()?;

    let mut page = build_page();
    page.on_mount();
    page.cycle_focus(true);

    loop {
        if page.is_dirty() {
            let geometry = renderer.context().geometry;
            let bounds = Rect::new(0, 0, geometry.cols, geometry.rows);

            renderer.begin_frame()?;
            renderer.clear()?;
            page.render(&mut renderer, bounds, &ctx)?;
            renderer.end_frame()?;
        }

        match events.poll(Duration::from_millis(16))? {
            Some(Event::Key(Key::Char('q'))) | Some(Event::Key(Key::Ctrl('c'))) => break,
            Some(Event::Key(Key::Esc)) => break,
            Some(Event::Resize(_, _)) => {
                renderer.refresh_geometry()?;
                page.mark_dirty();
            }
            Some(event) => {
                page.handle_event(&event);
            }
            None => {
                if page.tick(&ctx) {
                    page.mark_dirty();
                }
            }
        }
    }

    page.on_unmount();
    renderer.exit_alt_screen()?;
    renderer.show_cursor()?;

    Ok(())
}
