//! Stipple core engines: platform-agnostic state machines for the pixel
//! cursor trail, the testimonial carousel, the soft cursor dot, and the
//! hover-to-reveal text scramble.
//!
//! Each engine owns its state exclusively and is driven by host events
//! plus an injectable frame scheduler, so everything here is testable
//! without a windowing environment. Colors are resolved by the host; the
//! engines emit geometry and alpha only.

pub mod carousel;
pub mod config;
pub mod cursor;
pub mod render;
pub mod scramble;
pub mod trail;

pub use carousel::{CardContent, CardLayout, CardSlot, CarouselEngine};
pub use config::{CardDeck, ConfigError, EngineConfig};
pub use cursor::SoftCursor;
pub use scramble::ScrambleEngine;
pub use trail::TrailEngine;
