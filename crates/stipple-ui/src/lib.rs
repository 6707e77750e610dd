//! eframe demo host for the stipple engines.
//!
//! The window is a miniature of the portfolio page: a hero strip up top
//! (hovering it suppresses the cursor effects and reveals the scrambled
//! headline), the testimonial carousel below, and the pixel trail plus
//! soft cursor painted over everything. All engine state lives in
//! `stipple-core`; this crate only translates egui input and paints
//! engine output with palette colors.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use egui::{CornerRadius, FontId, Id, Pos2, Rect, Shape, Stroke, TouchPhase};
use tracing::info;

use stipple_core::config::CardDeck;
use stipple_core::{CarouselEngine, EngineConfig, ScrambleEngine, SoftCursor, TrailEngine};
use stipple_platform::input::{ArrowKey, PointerButton, PointerKind};
use stipple_platform::random::EntropyRandom;
use stipple_platform::scheduler::FrameScheduler;
use stipple_platform::signal::SignalSource;
use stipple_platform::Viewport;

const HERO_HEIGHT: f32 = 140.0;
const TRAIL_FADE_MS: f32 = 200.0;
const CARD_SLIDE_SECS: f32 = 0.5;
const HEADLINE: &str = "stipple - decorative pointer effects";

/// Maps `request_tick` onto egui repaint requests. The shared flag tells
/// the app which repaints carry a due trail frame.
struct EguiScheduler {
    ctx: egui::Context,
    pending: Arc<AtomicBool>,
}

impl FrameScheduler for EguiScheduler {
    fn request_tick(&mut self) {
        self.pending.store(true, Ordering::Relaxed);
        self.ctx.request_repaint();
    }

    fn cancel_tick(&mut self) {
        self.pending.store(false, Ordering::Relaxed);
    }

    fn tick_pending(&self) -> bool {
        self.pending.load(Ordering::Relaxed)
    }
}

pub fn run(config: EngineConfig, deck: CardDeck, reduced_motion: bool) -> stipple_platform::Result<()> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Stipple",
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(StippleApp::new(
                &creation_context.egui_ctx,
                config,
                deck,
                reduced_motion,
            )))
        }),
    )
    .map_err(|e| Box::<dyn std::error::Error + Send + Sync>::from(e.to_string()))?;
    Ok(())
}

pub struct StippleApp {
    trail: TrailEngine,
    trail_tick: Arc<AtomicBool>,
    trail_fade: f32,
    carousel: CarouselEngine,
    cursor: SoftCursor,
    headline: ScrambleEngine,
    suppression: SignalSource,
    last_width: f32,
}

impl StippleApp {
    pub fn new(
        ctx: &egui::Context,
        config: EngineConfig,
        deck: CardDeck,
        reduced_motion: bool,
    ) -> Self {
        let mut suppression = SignalSource::new(false);
        let trail_tick = Arc::new(AtomicBool::new(false));
        let scheduler = EguiScheduler {
            ctx: ctx.clone(),
            pending: Arc::clone(&trail_tick),
        };
        let mut trail = TrailEngine::new(
            config.trail,
            reduced_motion,
            Box::new(scheduler),
            Box::new(EntropyRandom::new()),
            suppression.subscribe(),
        );
        trail.mount();

        let viewport = Viewport::fallback();
        let carousel = CarouselEngine::new(deck, config.carousel, reduced_motion, viewport.width);
        let cursor = SoftCursor::new(config.cursor, reduced_motion);
        let headline = ScrambleEngine::new(
            HEADLINE,
            config.scramble,
            reduced_motion,
            Box::new(EntropyRandom::new()),
        );
        info!(reduced_motion, "stipple demo host up");

        Self {
            trail,
            trail_tick,
            trail_fade: 1.0,
            carousel,
            cursor,
            headline,
            suppression,
            last_width: viewport.width,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, hero: Rect, stage: Rect) {
        let events = ctx.input(|i| i.events.clone());
        let typing = ctx.wants_keyboard_input();
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    let p = glam::Vec2::new(pos.x, pos.y);
                    self.trail.pointer_move(p);
                    self.cursor.set_target(p);
                    let _capture = self.carousel.pointer_move(0, p);
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let p = glam::Vec2::new(pos.x, pos.y);
                    if pressed {
                        self.trail
                            .pointer_down(p, PointerKind::Mouse, PointerButton::Primary);
                        if stage.contains(pos) {
                            self.carousel
                                .pointer_down(0, p, PointerKind::Mouse, PointerButton::Primary);
                        }
                    } else {
                        let _release = self.carousel.pointer_up(0);
                    }
                }
                egui::Event::Touch { phase, pos, .. } => {
                    let p = glam::Vec2::new(pos.x, pos.y);
                    match phase {
                        TouchPhase::Start if stage.contains(pos) => self.carousel.touch_start(p),
                        TouchPhase::End => self.carousel.touch_end(p),
                        TouchPhase::Cancel => self.carousel.touch_end(p),
                        _ => {}
                    }
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    ..
                } if !typing => match key {
                    egui::Key::ArrowLeft => self.carousel.arrow(ArrowKey::Left),
                    egui::Key::ArrowRight => self.carousel.arrow(ArrowKey::Right),
                    _ => {}
                },
                _ => {}
            }
        }

        let hover = ctx.input(|i| i.pointer.latest_pos());
        let over_hero = hover.is_some_and(|p| hero.contains(p));
        self.suppression.set(over_hero);
        self.cursor.set_hidden(over_hero);
        self.headline.set_hovering(over_hero);
        self.carousel
            .set_paused(hover.is_some_and(|p| stage.contains(p)));

        // Plain click on a card rotates it into focus.
        if let Some(click) = ctx.input(|i| {
            if i.pointer.any_click() {
                i.pointer.interact_pos()
            } else {
                None
            }
        }) {
            let selected = self
                .carousel
                .layout()
                .iter()
                .filter(|(_, l)| !l.elevated)
                .find(|(_, l)| {
                    let center = stage.center() + egui::vec2(l.translation.x, l.translation.y);
                    Rect::from_center_size(center, egui::Vec2::splat(l.size)).contains(click)
                })
                .map(|(_, l)| l.offset);
            if let Some(offset) = selected {
                self.carousel.select(offset);
            }
        }
    }

    fn paint_carousel(&mut self, ctx: &egui::Context, painter: &egui::Painter, stage: Rect) {
        let visuals = ctx.style().visuals.clone();
        let fg = visuals.text_color();
        let layouts: Vec<(u64, String, String, stipple_core::CardLayout)> = self
            .carousel
            .layout()
            .into_iter()
            .map(|(slot, layout)| {
                (
                    slot.identity,
                    slot.content.text.clone(),
                    slot.content.attribution.clone(),
                    layout,
                )
            })
            .collect();

        for (identity, text, attribution, layout) in layouts {
            // Fresh identities restart these animations, which is exactly
            // what the recycle-on-rotation identity change is for.
            let x = ctx.animate_value_with_time(
                Id::new(("card-x", identity)),
                stage.center().x + layout.translation.x,
                CARD_SLIDE_SECS,
            );
            let y = ctx.animate_value_with_time(
                Id::new(("card-y", identity)),
                stage.center().y + layout.translation.y,
                CARD_SLIDE_SECS,
            );
            let center = Pos2::new(x, y);
            let half = layout.size / 2.0;
            let rot = egui::emath::Rot2::from_angle(layout.rotation_deg.to_radians());
            let corners: Vec<Pos2> = [
                egui::vec2(-half, -half),
                egui::vec2(half, -half),
                egui::vec2(half, half),
                egui::vec2(-half, half),
            ]
            .into_iter()
            .map(|corner| center + rot * corner)
            .collect();

            let fill = if layout.elevated {
                visuals.widgets.active.bg_fill
            } else {
                visuals.extreme_bg_color
            };
            painter.add(Shape::convex_polygon(
                corners,
                fill,
                Stroke::new(2.0, visuals.widgets.noninteractive.bg_stroke.color),
            ));

            let body = painter.layout(
                text,
                FontId::proportional(13.0),
                fg.gamma_multiply(if layout.elevated { 1.0 } else { 0.8 }),
                layout.size - 48.0,
            );
            painter.galley(center + egui::vec2(-half + 24.0, -half + 24.0), body, fg);
            painter.text(
                center + egui::vec2(-half + 24.0, half - 32.0),
                egui::Align2::LEFT_BOTTOM,
                attribution,
                FontId::monospace(11.0),
                fg.gamma_multiply(0.7),
            );
        }

        if self.carousel.hint_visible() {
            painter.text(
                Pos2::new(stage.center().x, stage.bottom() - 12.0),
                egui::Align2::CENTER_BOTTOM,
                "< drag >",
                FontId::monospace(11.0),
                fg.gamma_multiply(0.6),
            );
        }
    }

    fn paint_overlay(&self, ctx: &egui::Context) {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            Id::new("stipple-overlay"),
        ));
        let fg = ctx.style().visuals.text_color();

        for ring in self.trail.ring_instances() {
            painter.circle_stroke(
                Pos2::new(ring.center[0], ring.center[1]),
                ring.diameter / 2.0,
                Stroke::new(1.0, fg.gamma_multiply(ring.alpha * self.trail_fade)),
            );
        }
        for pixel in self.trail.pixel_instances() {
            let rect = Rect::from_center_size(
                Pos2::new(pixel.center[0], pixel.center[1]),
                egui::Vec2::splat(pixel.size),
            );
            painter.rect_filled(
                rect,
                CornerRadius::same(2),
                fg.gamma_multiply(pixel.alpha * self.trail_fade),
            );
        }
        if let Some(dot) = self.cursor.dot() {
            painter.circle_filled(
                Pos2::new(dot.center[0], dot.center[1]),
                dot.diameter / 2.0,
                fg.gamma_multiply(dot.alpha),
            );
        }
    }
}

impl eframe::App for StippleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt_ms = ctx.input(|i| i.stable_dt) * 1000.0;
        let screen = ctx.screen_rect();
        if (screen.width() - self.last_width).abs() > f32::EPSILON {
            self.last_width = screen.width();
            self.carousel.set_viewport_width(screen.width());
        }

        let hero = Rect::from_min_size(screen.min, egui::vec2(screen.width(), HERO_HEIGHT));
        let stage = Rect::from_min_max(
            Pos2::new(screen.min.x, screen.min.y + HERO_HEIGHT),
            screen.max,
        );

        self.handle_input(ctx, hero, stage);

        if self.trail_tick.swap(false, Ordering::Relaxed) {
            self.trail.advance_frame(dt_ms);
        }
        self.cursor.advance(dt_ms);
        self.carousel.tick(dt_ms);
        self.headline.tick(dt_ms);

        let fade_target = if self.trail.visible() { 1.0 } else { 0.0 };
        let fade_step = (dt_ms / TRAIL_FADE_MS).clamp(0.0, 1.0);
        self.trail_fade += (fade_target - self.trail_fade) * fade_step;

        egui::CentralPanel::default().show(ctx, |ui| {
            let fg = ui.visuals().text_color();
            ui.painter().text(
                hero.center(),
                egui::Align2::CENTER_CENTER,
                self.headline.display(),
                FontId::monospace(22.0),
                fg,
            );
            let painter = ui.painter().clone();
            self.paint_carousel(ctx, &painter, stage);

            // Prev/next chevrons; stepping by button counts as interaction
            // just like a drag does.
            let anchor = Pos2::new(stage.center().x, stage.bottom() - 44.0);
            let chevron = egui::Vec2::splat(32.0);
            let prev = Rect::from_center_size(anchor - egui::vec2(24.0, 0.0), chevron);
            let next = Rect::from_center_size(anchor + egui::vec2(24.0, 0.0), chevron);
            if ui.put(prev, egui::Button::new("<")).clicked() {
                self.carousel.move_by(-1, true);
            }
            if ui.put(next, egui::Button::new(">")).clicked() {
                self.carousel.move_by(1, true);
            }
        });
        self.paint_overlay(ctx);

        // Autoplay and the scramble idle churn need frames even without
        // input events.
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
