//! Pixel cursor trail: fading squares behind the pointer, ripple rings on
//! click.
//!
//! The engine owns two bounded, insertion-ordered pools and advances them
//! once per scheduler tick. It is inert under reduced motion, and an
//! externally owned suppression signal fades it out and clears it while the
//! pointer sits over the hero region.

use std::collections::VecDeque;

use glam::Vec2;
use tracing::{debug, info, trace};

use stipple_platform::input::{PointerButton, PointerKind};
use stipple_platform::random::RandomSource;
use stipple_platform::scheduler::FrameScheduler;
use stipple_platform::signal::SignalReceiver;

use crate::config::TrailConfig;
use crate::render::{PixelInstance, RingInstance};

/// Trailing alpha by slot position, applied on top of per-pixel opacity.
const POSITIONAL_ALPHAS: [f32; 5] = [1.0, 0.85, 0.7, 0.55, 0.4];

/// Pixels older than this fraction stop shrinking.
const MIN_SIZE_FACTOR: f32 = 0.3;

/// Age at which a pixel reaches the size floor.
const SHRINK_SPAN_FRAMES: f32 = 100.0;

/// Ripples spawn slightly pre-grown so the first frame is already a ring.
const RIPPLE_START_SCALE: f32 = 0.25;

/// Ring stroke alpha relative to ripple opacity.
const RING_ALPHA: f32 = 0.55;

/// Opacities this close to zero count as fully faded. Keeps the removal
/// frame exact despite accumulated f32 error in the per-frame decrement.
const OPACITY_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy)]
pub struct Pixel {
    pub id: u64,
    pub position: Vec2,
    pub opacity: f32,
    pub age: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Ripple {
    pub id: u64,
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

/// Pointer-driven particle trail with an injectable frame loop.
pub struct TrailEngine {
    config: TrailConfig,
    reduced_motion: bool,
    mounted: bool,
    suppressed: bool,
    fade_out_remaining_ms: Option<f32>,
    pixels: VecDeque<Pixel>,
    ripples: VecDeque<Ripple>,
    next_pixel_id: u64,
    next_ripple_id: u64,
    last_spawn: Option<Vec2>,
    scheduler: Box<dyn FrameScheduler>,
    random: Box<dyn RandomSource>,
    suppression: SignalReceiver,
}

impl TrailEngine {
    pub fn new(
        config: TrailConfig,
        reduced_motion: bool,
        scheduler: Box<dyn FrameScheduler>,
        random: Box<dyn RandomSource>,
        suppression: SignalReceiver,
    ) -> Self {
        Self {
            config,
            reduced_motion,
            mounted: false,
            suppressed: false,
            fade_out_remaining_ms: None,
            pixels: VecDeque::new(),
            ripples: VecDeque::new(),
            next_pixel_id: 0,
            next_ripple_id: 0,
            last_spawn: None,
            scheduler,
            random,
            suppression,
        }
    }

    /// Starts the frame loop. Under reduced motion the engine never
    /// requests a tick.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if !self.reduced_motion {
            self.scheduler.request_tick();
        }
        info!(reduced_motion = self.reduced_motion, "trail engine mounted");
    }

    /// Cancels the frame loop and drops all artifacts. Events arriving
    /// afterwards are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scheduler.cancel_tick();
        self.pixels.clear();
        self.ripples.clear();
        self.last_spawn = None;
        self.fade_out_remaining_ms = None;
        info!("trail engine unmounted");
    }

    fn active(&self) -> bool {
        self.mounted && !self.reduced_motion
    }

    /// Visible to the host's global opacity fade; false while suppressed.
    pub fn visible(&self) -> bool {
        self.active() && !self.suppressed
    }

    /// Spawns a trail pixel once the pointer has moved far enough from the
    /// last spawn point. Throttles density independent of event rate.
    pub fn pointer_move(&mut self, position: Vec2) {
        if !self.active() {
            return;
        }
        self.sync_suppression();
        if self.suppressed {
            return;
        }
        let Some(last) = self.last_spawn else {
            self.last_spawn = Some(position);
            return;
        };
        if position.distance(last) > self.config.spawn_distance {
            self.spawn_pixel(position, 0);
            self.last_spawn = Some(position);
        }
    }

    /// Primary mouse presses spray a burst of pre-aged pixels and one
    /// ripple. Touch and pen presses are ignored.
    pub fn pointer_down(&mut self, position: Vec2, kind: PointerKind, button: PointerButton) {
        if !self.active() {
            return;
        }
        self.sync_suppression();
        if self.suppressed {
            return;
        }
        if !kind.is_mouse() || button != PointerButton::Primary {
            return;
        }
        for _ in 0..self.config.burst_count {
            let theta = self.random.next_unit() * std::f32::consts::TAU;
            let radius = self.random.next_unit() * self.config.burst_radius;
            let offset = Vec2::new(theta.cos(), theta.sin()) * radius;
            self.spawn_pixel(position + offset, self.config.burst_start_age);
        }
        self.spawn_ripple(position);
        trace!(x = position.x, y = position.y, "burst spawned");
    }

    /// One frame of decay. `dt_ms` only drives the suppression fade-out
    /// countdown; pixel and ripple decay is per-frame by design.
    pub fn advance_frame(&mut self, dt_ms: f32) {
        if !self.active() {
            return;
        }
        self.sync_suppression();

        if self.suppressed {
            // Artifacts freeze under the host's opacity fade, then clear.
            let Some(remaining) = self.fade_out_remaining_ms else {
                return;
            };
            let remaining = remaining - dt_ms;
            if remaining <= 0.0 {
                self.pixels.clear();
                self.ripples.clear();
                self.last_spawn = None;
                self.fade_out_remaining_ms = None;
                self.scheduler.cancel_tick();
                debug!("trail cleared after suppression fade");
            } else {
                self.fade_out_remaining_ms = Some(remaining);
                self.scheduler.request_tick();
            }
            return;
        }

        for pixel in self.pixels.iter_mut() {
            pixel.opacity -= self.config.fade_per_frame;
            pixel.age += 1;
        }
        self.pixels.retain(|p| p.opacity > OPACITY_EPSILON);

        for ripple in self.ripples.iter_mut() {
            ripple.opacity -= self.config.ripple_fade_per_frame;
            ripple.scale += self.config.ripple_growth_per_frame;
        }
        self.ripples.retain(|r| r.opacity > OPACITY_EPSILON);

        self.scheduler.request_tick();
    }

    /// Render output for the trail squares: shrink with age, alpha from
    /// per-pixel opacity times the positional falloff table.
    pub fn pixel_instances(&self) -> Vec<PixelInstance> {
        if !self.active() {
            return Vec::new();
        }
        self.pixels
            .iter()
            .enumerate()
            .map(|(index, pixel)| {
                let shrink = (1.0 - pixel.age as f32 / SHRINK_SPAN_FRAMES).max(MIN_SIZE_FACTOR);
                let alpha = pixel.opacity * POSITIONAL_ALPHAS[index % POSITIONAL_ALPHAS.len()];
                PixelInstance {
                    center: pixel.position.to_array(),
                    size: self.config.pixel_size * shrink,
                    alpha: alpha.clamp(0.0, 1.0),
                }
            })
            .collect()
    }

    /// Render output for the ripple rings.
    pub fn ring_instances(&self) -> Vec<RingInstance> {
        if !self.active() {
            return Vec::new();
        }
        self.ripples
            .iter()
            .map(|ripple| RingInstance {
                center: ripple.position.to_array(),
                diameter: self.config.ripple_base_diameter * ripple.scale,
                alpha: (RING_ALPHA * ripple.opacity).clamp(0.0, 1.0),
            })
            .collect()
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.iter()
    }

    pub fn ripples(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    fn spawn_pixel(&mut self, position: Vec2, age: u32) {
        let pixel = Pixel {
            id: self.next_pixel_id,
            position,
            opacity: 1.0,
            age,
        };
        self.next_pixel_id += 1;
        self.pixels.push_back(pixel);
        while self.pixels.len() > self.config.trail_capacity {
            self.pixels.pop_front();
        }
    }

    fn spawn_ripple(&mut self, position: Vec2) {
        let ripple = Ripple {
            id: self.next_ripple_id,
            position,
            opacity: 1.0,
            scale: RIPPLE_START_SCALE,
        };
        self.next_ripple_id += 1;
        self.ripples.push_back(ripple);
        while self.ripples.len() > self.config.ripple_capacity {
            self.ripples.pop_front();
        }
    }

    /// Applies suppression edges. On suppression the fade-out countdown
    /// starts and the loop keeps ticking just long enough to run it; when
    /// suppression lifts the loop resumes.
    fn sync_suppression(&mut self) {
        let (suppressed, changed) = self.suppression.poll();
        if !changed {
            return;
        }
        if suppressed {
            self.suppressed = true;
            self.fade_out_remaining_ms = Some(self.config.fade_out_ms);
            self.scheduler.request_tick();
            debug!("cursor suppressed, trail fading out");
        } else {
            self.suppressed = false;
            self.fade_out_remaining_ms = None;
            self.scheduler.request_tick();
            debug!("cursor suppression lifted");
        }
    }
}
