//! Soft cursor dot that spring-follows the pointer.
//!
//! Overdamped spring per axis, integrated in small substeps with the
//! damping term taken implicitly so the stiff damping/mass ratio cannot
//! blow up the velocity update. The same suppression that hides the
//! trail eases the dot's opacity and scale down.

use glam::Vec2;

use crate::config::CursorConfig;
use crate::render::DotInstance;

/// Integration substep ceiling, seconds.
const MAX_SUBSTEP_S: f32 = 0.008;

/// Frames longer than this are truncated rather than integrated through.
const MAX_FRAME_MS: f32 = 100.0;

/// Parked off-viewport until the first pointer move.
const PARK_POSITION: Vec2 = Vec2::new(-100.0, -100.0);

pub struct SoftCursor {
    config: CursorConfig,
    reduced_motion: bool,
    position: Vec2,
    velocity: Vec2,
    target: Vec2,
    hidden: bool,
    opacity: f32,
    scale: f32,
}

impl SoftCursor {
    pub fn new(config: CursorConfig, reduced_motion: bool) -> Self {
        Self {
            config,
            reduced_motion,
            position: PARK_POSITION,
            velocity: Vec2::ZERO,
            target: PARK_POSITION,
            hidden: false,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    pub fn set_target(&mut self, position: Vec2) {
        if self.reduced_motion {
            return;
        }
        self.target = position;
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn advance(&mut self, dt_ms: f32) {
        if self.reduced_motion {
            return;
        }
        let mut remaining = (dt_ms.min(MAX_FRAME_MS) / 1000.0).max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP_S);
            // Implicit damping: h * damping / mass exceeds 2 at the
            // default constants, which an explicit update cannot take.
            let pull = self.config.stiffness / self.config.mass * (self.target - self.position);
            let drag = 1.0 + h * self.config.damping / self.config.mass;
            self.velocity = (self.velocity + pull * h) / drag;
            self.position += self.velocity * h;
            remaining -= h;
        }

        let ease = (dt_ms / self.config.ease_ms).clamp(0.0, 1.0);
        let opacity_target = if self.hidden { 0.0 } else { 1.0 };
        let scale_target = if self.hidden {
            self.config.hidden_scale
        } else {
            1.0
        };
        self.opacity += (opacity_target - self.opacity) * ease;
        self.scale += (scale_target - self.scale) * ease;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Render output; `None` under reduced motion.
    pub fn dot(&self) -> Option<DotInstance> {
        if self.reduced_motion {
            return None;
        }
        Some(DotInstance {
            center: self.position.to_array(),
            diameter: self.config.dot_diameter * self.scale,
            alpha: (self.config.base_alpha * self.opacity).clamp(0.0, 1.0),
        })
    }
}
