//! Testimonial carousel: a fixed circular card sequence rotated by
//! autoplay, drags, arrow keys, and direct selection.
//!
//! The sequence never grows or shrinks; rotation relocates items between
//! head and tail. Every relocated card gets a fresh identity so the host
//! restarts its mount transition — card content identity is the card
//! itself. `move_by` is the single mutating entry point; every gesture
//! handler reduces to it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use stipple_platform::input::{ArrowKey, PointerButton, PointerKind};

use crate::config::{CardDeck, CarouselConfig};

/// Horizontal slot pitch as a fraction of card size.
const SPACING_DIVISOR: f32 = 1.5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardContent {
    pub text: String,
    pub attribution: String,
    pub image_ref: String,
    pub link_url: String,
}

/// A card in the rotatable sequence. `identity` changes on every recycle.
#[derive(Debug, Clone)]
pub struct CardSlot {
    pub identity: u64,
    pub content: CardContent,
}

/// Where a slot sits relative to the focused center slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    /// Signed offset from the focused slot.
    pub offset: i32,
    pub translation: Vec2,
    pub rotation_deg: f32,
    pub elevated: bool,
    pub size: f32,
}

#[derive(Debug, Clone, Copy)]
struct PointerDrag {
    pointer_id: u64,
    kind: PointerKind,
    origin: Vec2,
    moved: bool,
}

pub struct CarouselEngine {
    config: CarouselConfig,
    reduced_motion: bool,
    slots: VecDeque<CardSlot>,
    next_identity: u64,
    interacted: bool,
    paused: bool,
    autoplay_elapsed_ms: f32,
    card_size: f32,
    pointer_drag: Option<PointerDrag>,
    touch_origin: Option<Vec2>,
}

impl CarouselEngine {
    pub fn new(
        deck: CardDeck,
        config: CarouselConfig,
        reduced_motion: bool,
        viewport_width: f32,
    ) -> Self {
        let mut next_identity = 0;
        let slots = deck
            .cards
            .into_iter()
            .map(|content| {
                let slot = CardSlot {
                    identity: next_identity,
                    content,
                };
                next_identity += 1;
                slot
            })
            .collect();
        let mut engine = Self {
            config,
            reduced_motion,
            slots,
            next_identity,
            interacted: false,
            paused: false,
            autoplay_elapsed_ms: 0.0,
            card_size: 0.0,
            pointer_drag: None,
            touch_origin: None,
        };
        engine.set_viewport_width(viewport_width);
        engine
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the focused slot: ⌊N/2⌋.
    pub fn focused_index(&self) -> usize {
        self.slots.len() / 2
    }

    pub fn focused(&self) -> Option<&CardSlot> {
        self.slots.get(self.focused_index())
    }

    pub fn slots(&self) -> impl Iterator<Item = &CardSlot> {
        self.slots.iter()
    }

    /// The one-time drag hint shows until the first real interaction.
    pub fn hint_visible(&self) -> bool {
        !self.interacted
    }

    pub fn interacted(&self) -> bool {
        self.interacted
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True during an active drag or touch gesture.
    pub fn is_interacting(&self) -> bool {
        self.pointer_drag.is_some() || self.touch_origin.is_some()
    }

    pub fn card_size(&self) -> f32 {
        self.card_size
    }

    /// Rotates the sequence. Positive steps move head items to the tail
    /// (rotate left), negative the reverse. Zero is a strict no-op that
    /// does not latch the interacted flag. Sequences shorter than two
    /// cards never rotate.
    pub fn move_by(&mut self, steps: i32, counts_as_interaction: bool) {
        if steps == 0 {
            return;
        }
        if counts_as_interaction && !self.interacted {
            self.interacted = true;
        }
        if self.slots.len() < 2 {
            return;
        }
        if steps > 0 {
            for _ in 0..steps {
                if let Some(mut slot) = self.slots.pop_front() {
                    slot.identity = self.fresh_identity();
                    self.slots.push_back(slot);
                }
            }
        } else {
            for _ in 0..steps.unsigned_abs() {
                if let Some(mut slot) = self.slots.pop_back() {
                    slot.identity = self.fresh_identity();
                    self.slots.push_front(slot);
                }
            }
        }
        trace!(steps, "carousel rotated");
    }

    /// Direct selection: rotating a card at signed offset `k` into focus.
    pub fn select(&mut self, offset: i32) {
        self.move_by(offset, true);
    }

    pub fn arrow(&mut self, key: ArrowKey) {
        match key {
            ArrowKey::Left => self.move_by(-1, true),
            ArrowKey::Right => self.move_by(1, true),
        }
    }

    /// Pause while the pointer hovers or focus is inside the control.
    /// Toggling restarts the autoplay interval from zero.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.autoplay_elapsed_ms = 0.0;
        debug!(paused, "carousel pause toggled");
    }

    /// Advances the autoplay accumulator. While ineligible the elapsed
    /// time resets, so at most one logical timer ever exists and resuming
    /// starts a full interval.
    pub fn tick(&mut self, dt_ms: f32) {
        if self.paused || self.is_interacting() || self.reduced_motion {
            self.autoplay_elapsed_ms = 0.0;
            return;
        }
        self.autoplay_elapsed_ms += dt_ms;
        while self.autoplay_elapsed_ms >= self.config.autoplay_interval_ms {
            self.autoplay_elapsed_ms -= self.config.autoplay_interval_ms;
            // Autoplay never latches the interacted flag.
            self.move_by(1, false);
        }
    }

    /// Begins a possible drag. Non-primary mouse buttons are ignored.
    pub fn pointer_down(
        &mut self,
        pointer_id: u64,
        position: Vec2,
        kind: PointerKind,
        button: PointerButton,
    ) {
        if kind.is_mouse() && button != PointerButton::Primary {
            return;
        }
        if !self.interacted {
            self.interacted = true;
        }
        self.pointer_drag = Some(PointerDrag {
            pointer_id,
            kind,
            origin: position,
            moved: false,
        });
    }

    /// Steps the carousel when the drag crosses the horizontal threshold.
    /// The gesture origin resets after each step, so one long drag issues
    /// multiple discrete steps. Returns true when the host should acquire
    /// pointer capture (first qualifying move of a mouse drag, preserving
    /// plain click-to-select otherwise).
    pub fn pointer_move(&mut self, pointer_id: u64, position: Vec2) -> bool {
        let Some(drag) = self.pointer_drag.as_mut() else {
            return false;
        };
        if drag.pointer_id != pointer_id {
            return false;
        }
        let delta = position - drag.origin;
        if delta.x.abs() < self.config.pointer_threshold || delta.x.abs() < delta.y.abs() {
            return false;
        }
        let capture = !drag.moved && drag.kind.is_mouse();
        drag.moved = true;
        drag.origin = position;
        let steps = if delta.x < 0.0 { 1 } else { -1 };
        self.move_by(steps, true);
        capture
    }

    /// Ends a drag. Returns true when the host should release pointer
    /// capture.
    pub fn pointer_up(&mut self, pointer_id: u64) -> bool {
        self.end_pointer(pointer_id)
    }

    pub fn pointer_cancel(&mut self, pointer_id: u64) -> bool {
        self.end_pointer(pointer_id)
    }

    pub fn touch_start(&mut self, position: Vec2) {
        if !self.interacted {
            self.interacted = true;
        }
        self.touch_origin = Some(position);
    }

    /// A touch swipe steps once if it was mostly horizontal and crossed
    /// the touch threshold.
    pub fn touch_end(&mut self, position: Vec2) {
        let Some(origin) = self.touch_origin.take() else {
            return;
        };
        let delta = position - origin;
        if delta.x.abs() < self.config.touch_threshold || delta.x.abs() < delta.y.abs() {
            return;
        }
        let steps = if delta.x < 0.0 { 1 } else { -1 };
        self.move_by(steps, true);
    }

    /// Re-evaluates the responsive card size against the breakpoint.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.card_size = if width >= self.config.breakpoint_width {
            self.config.card_size_large
        } else {
            self.config.card_size_small
        };
    }

    /// Radial slot layout: the focused card is elevated, the rest fan out
    /// with vertical and rotational jitter alternating by offset parity.
    pub fn layout(&self) -> Vec<(&CardSlot, CardLayout)> {
        let focused = self.focused_index() as i32;
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let offset = index as i32 - focused;
                let elevated = offset == 0;
                let x = self.card_size / SPACING_DIVISOR * offset as f32;
                let (y, rotation_deg) = if elevated {
                    (-self.config.focus_raise, 0.0)
                } else if offset % 2 != 0 {
                    (self.config.jitter_y, self.config.jitter_deg)
                } else {
                    (-self.config.jitter_y, -self.config.jitter_deg)
                };
                let layout = CardLayout {
                    offset,
                    translation: Vec2::new(x, y),
                    rotation_deg,
                    elevated,
                    size: self.card_size,
                };
                (slot, layout)
            })
            .collect()
    }

    fn end_pointer(&mut self, pointer_id: u64) -> bool {
        let Some(drag) = self.pointer_drag else {
            return false;
        };
        if drag.pointer_id != pointer_id {
            return false;
        }
        self.pointer_drag = None;
        drag.moved && drag.kind.is_mouse()
    }

    fn fresh_identity(&mut self) -> u64 {
        let id = self.next_identity;
        self.next_identity += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardDeck;

    fn deck_of(n: usize) -> CardDeck {
        CardDeck {
            cards: (0..n)
                .map(|i| CardContent {
                    text: format!("card {i}"),
                    attribution: format!("author {i}"),
                    image_ref: format!("cards/{i}.jpeg"),
                    link_url: "https://example.com".into(),
                })
                .collect(),
        }
    }

    fn engine_of(n: usize) -> CarouselEngine {
        CarouselEngine::new(deck_of(n), CarouselConfig::default(), false, 1024.0)
    }

    fn contents(engine: &CarouselEngine) -> Vec<String> {
        engine.slots().map(|s| s.content.text.clone()).collect()
    }

    #[test]
    fn content_multiset_is_invariant_under_moves() {
        let mut engine = engine_of(7);
        let mut expected = contents(&engine);
        expected.sort();
        for steps in [3, -2, 7, -7, 1, -1, 10] {
            engine.move_by(steps, true);
        }
        let mut actual = contents(&engine);
        actual.sort();
        assert_eq!(actual, expected);
        assert_eq!(engine.len(), 7);
    }

    #[test]
    fn move_rotates_cyclic_order_only() {
        let mut engine = engine_of(5);
        engine.move_by(2, false);
        assert_eq!(
            contents(&engine),
            vec!["card 2", "card 3", "card 4", "card 0", "card 1"]
        );
        engine.move_by(-2, false);
        assert_eq!(
            contents(&engine),
            vec!["card 0", "card 1", "card 2", "card 3", "card 4"]
        );
    }

    #[test]
    fn single_step_buttons_rotate_and_latch() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.move_by(1, true);
        assert_eq!(contents(&engine)[6], start[0]);
        assert!(engine.interacted());
        assert!(!engine.hint_visible());
        engine.move_by(-1, true);
        assert_eq!(contents(&engine), start);
    }

    #[test]
    fn move_zero_never_mutates_or_latches() {
        let mut engine = engine_of(7);
        let before = contents(&engine);
        engine.move_by(0, true);
        assert_eq!(contents(&engine), before);
        assert!(!engine.interacted());
        assert!(engine.hint_visible());
    }

    #[test]
    fn card_at_offset_k_moves_into_focus() {
        for k in [-3, -1, 1, 2, 3] {
            let mut engine = engine_of(7);
            let target = {
                let index = (engine.focused_index() as i32 + k) as usize;
                engine.slots().nth(index).expect("in range").content.clone()
            };
            engine.move_by(k, true);
            assert_eq!(engine.focused().expect("focused").content, target);
        }
    }

    #[test]
    fn seven_card_scenario_move_two() {
        let mut engine = engine_of(7);
        assert_eq!(engine.focused_index(), 3);
        let originally_at_5 = engine.slots().nth(5).expect("slot 5").content.clone();
        let kept_identities: Vec<u64> = engine.slots().skip(2).map(|s| s.identity).collect();

        engine.move_by(2, true);

        assert_eq!(engine.focused().expect("focused").content, originally_at_5);
        assert_eq!(
            contents(&engine),
            vec!["card 2", "card 3", "card 4", "card 5", "card 6", "card 0", "card 1"]
        );
        // Unwrapped cards keep their identity; the two recycled ones don't.
        let after: Vec<u64> = engine.slots().take(5).map(|s| s.identity).collect();
        assert_eq!(after, kept_identities);
        let recycled: Vec<u64> = engine.slots().skip(5).map(|s| s.identity).collect();
        assert!(recycled.iter().all(|id| *id >= 7));
    }

    #[test]
    fn recycled_identities_are_fresh_and_unique() {
        let mut engine = engine_of(7);
        let mut seen: Vec<u64> = engine.slots().map(|s| s.identity).collect();
        for _ in 0..10 {
            engine.move_by(1, false);
            for slot in engine.slots() {
                if !seen.contains(&slot.identity) {
                    seen.push(slot.identity);
                }
            }
        }
        // 7 originals + 10 recycles.
        assert_eq!(seen.len(), 17);
    }

    #[test]
    fn empty_and_single_sequences_are_safe() {
        let mut empty = engine_of(0);
        empty.move_by(3, true);
        assert!(empty.is_empty());
        assert!(empty.focused().is_none());

        let mut single = engine_of(1);
        single.move_by(-5, true);
        assert_eq!(contents(&single), vec!["card 0"]);
    }

    #[test]
    fn autoplay_rotates_without_latching_interaction() {
        let mut engine = engine_of(7);
        let first = contents(&engine)[0].clone();
        engine.tick(4200.0);
        assert_eq!(contents(&engine)[6], first);
        assert!(!engine.interacted());
        assert!(engine.hint_visible());
    }

    #[test]
    fn autoplay_accumulates_across_ticks() {
        let mut engine = engine_of(7);
        for _ in 0..41 {
            engine.tick(100.0);
        }
        assert!(!engine.interacted());
        let before = contents(&engine);
        engine.tick(100.0);
        assert_ne!(contents(&engine), before);
    }

    #[test]
    fn pause_resets_the_autoplay_interval() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.tick(4000.0);
        engine.set_paused(true);
        engine.tick(4200.0);
        assert_eq!(contents(&engine), start);
        engine.set_paused(false);
        // Resume restarts the full interval.
        engine.tick(300.0);
        assert_eq!(contents(&engine), start);
        engine.tick(3900.0);
        assert_ne!(contents(&engine), start);
    }

    #[test]
    fn reduced_motion_disables_autoplay() {
        let mut engine = CarouselEngine::new(deck_of(7), CarouselConfig::default(), true, 1024.0);
        let start = contents(&engine);
        engine.tick(100_000.0);
        assert_eq!(contents(&engine), start);
    }

    #[test]
    fn drag_left_steps_forward_and_captures_once() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.pointer_down(1, Vec2::new(200.0, 100.0), PointerKind::Mouse, PointerButton::Primary);
        assert!(engine.is_interacting());

        // Below threshold: nothing.
        assert!(!engine.pointer_move(1, Vec2::new(170.0, 100.0)));
        assert_eq!(contents(&engine), start);

        // Crossing the threshold leftwards: one step, capture requested.
        assert!(engine.pointer_move(1, Vec2::new(130.0, 100.0)));
        assert_eq!(contents(&engine)[6], start[0]);

        // Origin reset: another 70px leftwards steps again, no re-capture.
        assert!(!engine.pointer_move(1, Vec2::new(60.0, 100.0)));
        assert_eq!(contents(&engine)[6], start[1]);

        assert!(engine.pointer_up(1));
        assert!(!engine.is_interacting());
    }

    #[test]
    fn drag_right_steps_backward() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.pointer_down(1, Vec2::new(100.0, 100.0), PointerKind::Mouse, PointerButton::Primary);
        engine.pointer_move(1, Vec2::new(165.0, 100.0));
        assert_eq!(contents(&engine)[0], start[6]);
    }

    #[test]
    fn mostly_vertical_drags_are_ignored() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.pointer_down(1, Vec2::new(100.0, 100.0), PointerKind::Mouse, PointerButton::Primary);
        assert!(!engine.pointer_move(1, Vec2::new(170.0, 200.0)));
        assert_eq!(contents(&engine), start);
    }

    #[test]
    fn secondary_button_does_not_start_a_drag() {
        let mut engine = engine_of(7);
        engine.pointer_down(
            1,
            Vec2::new(100.0, 100.0),
            PointerKind::Mouse,
            PointerButton::Secondary,
        );
        assert!(!engine.is_interacting());
        assert!(!engine.interacted());
    }

    #[test]
    fn touch_drags_never_request_capture() {
        let mut engine = engine_of(7);
        engine.pointer_down(2, Vec2::new(100.0, 100.0), PointerKind::Touch, PointerButton::Primary);
        assert!(!engine.pointer_move(2, Vec2::new(30.0, 100.0)));
        assert!(!engine.pointer_up(2));
    }

    #[test]
    fn unrelated_pointer_ids_are_ignored() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.pointer_down(1, Vec2::new(100.0, 100.0), PointerKind::Mouse, PointerButton::Primary);
        assert!(!engine.pointer_move(9, Vec2::new(0.0, 100.0)));
        assert_eq!(contents(&engine), start);
        assert!(!engine.pointer_up(9));
        assert!(engine.is_interacting());
    }

    #[test]
    fn interacting_suppresses_autoplay() {
        let mut engine = engine_of(7);
        engine.pointer_down(1, Vec2::new(100.0, 100.0), PointerKind::Mouse, PointerButton::Primary);
        let during = contents(&engine);
        engine.tick(10_000.0);
        assert_eq!(contents(&engine), during);
        engine.pointer_up(1);
        engine.tick(4200.0);
        assert_ne!(contents(&engine), during);
    }

    #[test]
    fn touch_swipe_steps_once() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.touch_start(Vec2::new(200.0, 100.0));
        assert!(engine.is_interacting());
        engine.touch_end(Vec2::new(140.0, 100.0));
        assert_eq!(contents(&engine)[6], start[0]);
        assert!(!engine.is_interacting());

        // Below the 50px touch threshold: no step.
        let mid = contents(&engine);
        engine.touch_start(Vec2::new(200.0, 100.0));
        engine.touch_end(Vec2::new(160.0, 100.0));
        assert_eq!(contents(&engine), mid);
    }

    #[test]
    fn arrows_map_to_single_steps() {
        let mut engine = engine_of(7);
        let start = contents(&engine);
        engine.arrow(ArrowKey::Right);
        assert_eq!(contents(&engine)[6], start[0]);
        engine.arrow(ArrowKey::Left);
        assert_eq!(contents(&engine), start);
        assert!(engine.interacted());
    }

    #[test]
    fn selection_rotates_target_into_focus() {
        let mut engine = engine_of(7);
        let layouts: Vec<i32> = engine.layout().iter().map(|(_, l)| l.offset).collect();
        assert_eq!(layouts, vec![-3, -2, -1, 0, 1, 2, 3]);
        let target = engine.slots().nth(1).expect("slot 1").content.clone();
        engine.select(-2);
        assert_eq!(engine.focused().expect("focused").content, target);
    }

    #[test]
    fn layout_elevates_focus_and_jitters_by_parity() {
        let engine = engine_of(7);
        let layout = engine.layout();
        let center = layout[3].1;
        assert!(center.elevated);
        assert_eq!(center.translation, Vec2::new(0.0, -65.0));
        assert_eq!(center.rotation_deg, 0.0);

        let right1 = layout[4].1;
        assert_eq!(right1.translation.x, 365.0 / 1.5);
        assert_eq!(right1.translation.y, 15.0);
        assert_eq!(right1.rotation_deg, 2.5);

        let right2 = layout[5].1;
        assert_eq!(right2.translation.y, -15.0);
        assert_eq!(right2.rotation_deg, -2.5);

        // Negative odd offsets jitter the same way as positive odd ones.
        let left1 = layout[2].1;
        assert_eq!(left1.translation.y, 15.0);
        assert_eq!(left1.rotation_deg, 2.5);
    }

    #[test]
    fn viewport_breakpoint_switches_card_size() {
        let mut engine = engine_of(7);
        assert_eq!(engine.card_size(), 365.0);
        engine.set_viewport_width(639.0);
        assert_eq!(engine.card_size(), 290.0);
        engine.set_viewport_width(640.0);
        assert_eq!(engine.card_size(), 365.0);
    }
}
