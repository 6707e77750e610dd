use glam::Vec2;

use stipple_core::config::{CardDeck, CarouselConfig};
use stipple_core::{CardContent, CarouselEngine};
use stipple_platform::input::{PointerButton, PointerKind};

fn deck(n: usize) -> CardDeck {
    CardDeck {
        cards: (0..n)
            .map(|i| CardContent {
                text: format!("entry {i}"),
                attribution: format!("tag {i}"),
                image_ref: format!("cards/{i}.jpeg"),
                link_url: "https://example.com".into(),
            })
            .collect(),
    }
}

fn texts(engine: &CarouselEngine) -> Vec<String> {
    engine.slots().map(|s| s.content.text.clone()).collect()
}

#[test]
fn move_two_focuses_the_card_two_to_the_right() {
    // Fresh 7-card engine: focus sits at index 3.
    let mut engine = CarouselEngine::new(deck(7), CarouselConfig::default(), false, 1024.0);
    assert_eq!(engine.focused_index(), 3);
    assert_eq!(engine.focused().expect("focused").content.text, "entry 3");

    engine.move_by(2, true);

    // The card originally at offset +2 (index 5) is now focused and the
    // order is a left rotation by two.
    assert_eq!(engine.focused().expect("focused").content.text, "entry 5");
    assert_eq!(
        texts(&engine),
        vec!["entry 2", "entry 3", "entry 4", "entry 5", "entry 6", "entry 0", "entry 1"]
    );
}

#[test]
fn interleaved_gestures_preserve_the_content_multiset() {
    let mut engine = CarouselEngine::new(deck(7), CarouselConfig::default(), false, 1024.0);
    let mut expected = texts(&engine);
    expected.sort();

    engine.pointer_down(1, Vec2::new(300.0, 50.0), PointerKind::Mouse, PointerButton::Primary);
    engine.pointer_move(1, Vec2::new(200.0, 50.0));
    engine.pointer_move(1, Vec2::new(100.0, 50.0));
    engine.pointer_up(1);
    engine.touch_start(Vec2::new(100.0, 50.0));
    engine.touch_end(Vec2::new(300.0, 50.0));
    engine.select(3);
    engine.tick(4200.0);

    let mut actual = texts(&engine);
    actual.sort();
    assert_eq!(actual, expected);
}

#[test]
fn autoplay_single_fire_keeps_hint_visible() {
    let mut engine = CarouselEngine::new(deck(7), CarouselConfig::default(), false, 1024.0);
    let start = texts(&engine);

    engine.tick(4200.0);

    let rotated = texts(&engine);
    assert_eq!(rotated[6], start[0]);
    assert_eq!(&rotated[..6], &start[1..]);
    assert!(!engine.interacted());
    assert!(engine.hint_visible());
}
