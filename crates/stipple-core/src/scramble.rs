//! Hover-to-reveal text scramble.
//!
//! The text starts scrambled and rescrambles on a fixed step interval.
//! On hover it either counts down a number of scramble iterations or, in
//! sequential mode, reveals one character per step in the configured
//! direction. Once fully revealed it stays revealed. Spaces never
//! scramble; revealed characters never revert.

use tracing::trace;

use stipple_platform::random::RandomSource;

use crate::config::{RevealDirection, ScrambleConfig};

pub struct ScrambleEngine {
    config: ScrambleConfig,
    reduced_motion: bool,
    text: Vec<char>,
    display: Vec<char>,
    charset: Vec<char>,
    revealed: Vec<bool>,
    revealed_count: usize,
    hovering: bool,
    done: bool,
    iterations: u32,
    elapsed_ms: f32,
    random: Box<dyn RandomSource>,
}

impl ScrambleEngine {
    pub fn new(
        text: &str,
        config: ScrambleConfig,
        reduced_motion: bool,
        random: Box<dyn RandomSource>,
    ) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let charset: Vec<char> = config.charset.chars().collect();
        let len = chars.len();
        let mut engine = Self {
            config,
            reduced_motion,
            display: chars.clone(),
            text: chars,
            charset,
            revealed: vec![false; len],
            revealed_count: 0,
            hovering: false,
            done: reduced_motion || len == 0,
            iterations: 0,
            elapsed_ms: 0.0,
            random,
        };
        if !engine.done {
            // Start scrambled rather than waiting out the first interval.
            engine.rescramble();
        }
        engine
    }

    /// Hover toggles restart the iteration countdown and step phase, the
    /// way re-arming a repeat timer would.
    pub fn set_hovering(&mut self, hovering: bool) {
        if self.hovering == hovering {
            return;
        }
        self.hovering = hovering;
        self.iterations = 0;
        self.elapsed_ms = 0.0;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn display(&self) -> String {
        if self.reduced_motion || self.done {
            return self.text.iter().collect();
        }
        self.display.iter().collect()
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if self.done {
            return;
        }
        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= self.config.step_ms {
            self.elapsed_ms -= self.config.step_ms;
            self.step();
            if self.done {
                return;
            }
        }
    }

    fn step(&mut self) {
        if !self.hovering {
            // Idle: keep churning indefinitely.
            self.rescramble();
            return;
        }
        if self.config.sequential {
            if self.revealed_count < self.text.len() {
                let index = self.next_reveal_index();
                if !self.revealed[index] {
                    self.revealed[index] = true;
                    self.revealed_count += 1;
                }
                self.rescramble();
            }
            if self.revealed_count >= self.text.len() {
                self.finish();
            }
        } else {
            self.rescramble();
            self.iterations += 1;
            if self.iterations >= self.config.max_iterations {
                self.finish();
            }
        }
    }

    fn finish(&mut self) {
        self.done = true;
        self.display = self.text.clone();
        trace!("scramble revealed");
    }

    fn next_reveal_index(&mut self) -> usize {
        let len = self.text.len();
        match self.config.reveal_direction {
            RevealDirection::Start => self.revealed_count.min(len - 1),
            RevealDirection::End => len - 1 - self.revealed_count.min(len - 1),
            RevealDirection::Center => {
                let middle = len / 2;
                let offset = self.revealed_count / 2;
                let candidate = if self.revealed_count % 2 == 0 {
                    middle.checked_add(offset)
                } else {
                    middle.checked_sub(offset + 1)
                };
                match candidate {
                    Some(index) if index < len && !self.revealed[index] => index,
                    _ => self
                        .revealed
                        .iter()
                        .position(|revealed| !revealed)
                        .unwrap_or(0),
                }
            }
        }
    }

    fn rescramble(&mut self) {
        if self.config.use_original_chars {
            self.rescramble_from_own_chars();
            return;
        }
        for i in 0..self.text.len() {
            self.display[i] = if self.text[i] == ' ' {
                ' '
            } else if self.revealed[i] || self.charset.is_empty() {
                self.text[i]
            } else {
                self.charset[self.random.next_index(self.charset.len())]
            };
        }
    }

    /// Shuffles the text's own unrevealed, non-space characters in place.
    fn rescramble_from_own_chars(&mut self) {
        let mut pool: Vec<char> = self
            .text
            .iter()
            .enumerate()
            .filter(|&(i, &c)| c != ' ' && !self.revealed[i])
            .map(|(_, &c)| c)
            .collect();
        // Fisher-Yates.
        for i in (1..pool.len()).rev() {
            let j = self.random.next_index(i + 1);
            pool.swap(i, j);
        }
        let mut next = pool.into_iter();
        for i in 0..self.text.len() {
            self.display[i] = if self.text[i] == ' ' {
                ' '
            } else if self.revealed[i] {
                self.text[i]
            } else {
                next.next().unwrap_or(self.text[i])
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stipple_platform::random::SeededRandom;

    fn engine(text: &str, config: ScrambleConfig) -> ScrambleEngine {
        ScrambleEngine::new(text, config, false, Box::new(SeededRandom::new(11)))
    }

    fn sequential(direction: RevealDirection) -> ScrambleConfig {
        ScrambleConfig {
            sequential: true,
            reveal_direction: direction,
            ..ScrambleConfig::default()
        }
    }

    #[test]
    fn idle_scramble_preserves_spaces_and_length() {
        let mut engine = engine("ab cd", ScrambleConfig::default());
        for _ in 0..20 {
            engine.tick(50.0);
            let display = engine.display();
            assert_eq!(display.chars().count(), 5);
            assert_eq!(display.chars().nth(2), Some(' '));
        }
        assert!(!engine.is_done());
    }

    #[test]
    fn hover_reveals_after_max_iterations() {
        let mut engine = engine("portfolio", ScrambleConfig::default());
        engine.set_hovering(true);
        // 10 iterations at 50ms each.
        engine.tick(9.0 * 50.0);
        assert!(!engine.is_done());
        engine.tick(50.0);
        assert!(engine.is_done());
        assert_eq!(engine.display(), "portfolio");
    }

    #[test]
    fn hover_toggle_restarts_the_iteration_countdown() {
        let mut engine = engine("portfolio", ScrambleConfig::default());
        engine.set_hovering(true);
        engine.tick(5.0 * 50.0);
        engine.set_hovering(false);
        engine.tick(50.0);
        // A fresh hover gets the full iteration budget again.
        engine.set_hovering(true);
        engine.tick(9.0 * 50.0);
        assert!(!engine.is_done());
        engine.tick(50.0);
        assert!(engine.is_done());
    }

    #[test]
    fn sequential_start_reveals_prefix_first() {
        let mut engine = engine("abcdef", sequential(RevealDirection::Start));
        engine.set_hovering(true);
        engine.tick(3.0 * 50.0);
        let display: Vec<char> = engine.display().chars().collect();
        assert_eq!(&display[..3], &['a', 'b', 'c']);
        assert!(!engine.is_done());
        engine.tick(3.0 * 50.0);
        assert!(engine.is_done());
        assert_eq!(engine.display(), "abcdef");
    }

    #[test]
    fn sequential_end_reveals_suffix_first() {
        let mut engine = engine("abcdef", sequential(RevealDirection::End));
        engine.set_hovering(true);
        engine.tick(2.0 * 50.0);
        let display: Vec<char> = engine.display().chars().collect();
        assert_eq!(&display[4..], &['e', 'f']);
    }

    #[test]
    fn sequential_center_order_expands_outward() {
        // For length 5 the reveal order is 2, 1, 3, 0, 4.
        let mut engine = engine("abcde", sequential(RevealDirection::Center));
        engine.set_hovering(true);

        engine.tick(50.0);
        assert_eq!(engine.display().chars().nth(2), Some('c'));

        engine.tick(50.0);
        assert_eq!(engine.display().chars().nth(1), Some('b'));

        engine.tick(50.0);
        assert_eq!(engine.display().chars().nth(3), Some('d'));

        engine.tick(50.0);
        assert_eq!(engine.display().chars().next(), Some('a'));

        engine.tick(50.0);
        assert!(engine.is_done());
    }

    #[test]
    fn revealed_characters_never_revert() {
        let mut engine = engine("abcdefgh", sequential(RevealDirection::Start));
        engine.set_hovering(true);
        let mut revealed = 0usize;
        for _ in 0..8 {
            engine.tick(50.0);
            revealed += 1;
            let display: Vec<char> = engine.display().chars().collect();
            for (i, c) in display.iter().enumerate().take(revealed.min(8)) {
                assert_eq!(*c, char::from(b'a' + i as u8));
            }
        }
    }

    #[test]
    fn own_chars_mode_permutes_the_original_text() {
        let config = ScrambleConfig {
            use_original_chars: true,
            ..ScrambleConfig::default()
        };
        let mut engine = engine("hello world", config);
        engine.tick(50.0);
        let display = engine.display();
        assert_eq!(display.chars().nth(5), Some(' '));
        let mut original: Vec<char> = "hello world".chars().filter(|&c| c != ' ').collect();
        let mut scrambled: Vec<char> = display.chars().filter(|&c| c != ' ').collect();
        original.sort_unstable();
        scrambled.sort_unstable();
        assert_eq!(original, scrambled);
    }

    #[test]
    fn reduced_motion_shows_plain_text() {
        let mut engine = ScrambleEngine::new(
            "plain",
            ScrambleConfig::default(),
            true,
            Box::new(SeededRandom::new(1)),
        );
        engine.set_hovering(true);
        engine.tick(1000.0);
        assert_eq!(engine.display(), "plain");
        assert!(engine.is_done());
    }

    #[test]
    fn empty_text_is_immediately_done() {
        let engine = engine("", ScrambleConfig::default());
        assert!(engine.is_done());
        assert_eq!(engine.display(), "");
    }
}
