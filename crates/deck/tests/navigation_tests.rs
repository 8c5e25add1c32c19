// Integration tests for deck navigation

use mentorscroll_core::{ContentType, ExpertSlug, ParsedContent, ReelCard};
use mentorscroll_deck::{
    transform, DeckNavigator, Direction, InputEvent, InputMapper, ManualClock, NavKey,
    MAX_VISIBLE_DISTANCE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn cards(n: usize) -> Vec<ReelCard> {
    (0..n)
        .map(|i| {
            ReelCard::generated(
                ExpertSlug::new("prof-timeline"),
                format!("topic {}", i),
                ContentType::Explanation,
                ParsedContent::titled(format!("Card {}", i)),
            )
        })
        .collect()
}

fn deck(n: usize, start: usize) -> (DeckNavigator<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let deck = DeckNavigator::with_clock(cards(n), clock.clone()).starting_at(start);
    (deck, clock)
}

/// Advances past both phase delays of any transition
fn settle(deck: &mut DeckNavigator<ManualClock>, clock: &ManualClock) {
    clock.advance(Duration::from_millis(1_000));
    deck.tick();
    assert!(!deck.is_transitioning());
}

#[test]
fn test_end_to_end_navigation_wraps() {
    let (mut deck, clock) = deck(4, 0);

    for expected in 1..=3 {
        assert!(deck.next());
        settle(&mut deck, &clock);
        assert_eq!(deck.current_index(), Some(expected));
    }

    deck.next();
    settle(&mut deck, &clock);
    assert_eq!(deck.current_index(), Some(0));
}

#[test]
fn test_dropped_input_advances_once() {
    let (mut deck, clock) = deck(4, 0);

    assert!(deck.next());
    assert!(!deck.next());
    settle(&mut deck, &clock);

    assert_eq!(deck.current_index(), Some(1));
}

#[test]
fn test_next_then_prev_changes_index_exactly_once() {
    let (mut deck, clock) = deck(5, 2);

    deck.next();
    deck.prev();
    settle(&mut deck, &clock);

    assert_eq!(deck.current_index(), Some(3));
}

#[test]
fn test_n_nexts_return_to_start() {
    for n in 1..=7 {
        for start in 0..n {
            let (mut deck, clock) = deck(n, start);
            for _ in 0..n {
                deck.next();
                settle(&mut deck, &clock);
            }
            assert_eq!(deck.current_index(), Some(start), "n={n} start={start}");
        }
    }
}

#[test]
fn test_random_walk_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(42);

    for n in 1..=6 {
        let (mut deck, clock) = deck(n, 0);
        for _ in 0..200 {
            match rng.random_range(0..4) {
                0 => {
                    deck.next();
                }
                1 => {
                    deck.prev();
                }
                2 => {
                    deck.shuffle(&mut rng);
                }
                _ => {}
            }
            // Sometimes settle, sometimes fire the next input mid-transition
            if rng.random_bool(0.5) {
                clock.advance(Duration::from_millis(rng.random_range(0..600)));
            }
            deck.tick();
            let index = deck.current_index().unwrap();
            assert!(index < n);
        }
    }
}

#[test]
fn test_shuffle_never_repeats_current() {
    let mut rng = StdRng::seed_from_u64(9);

    for n in 2..=6 {
        let (mut deck, clock) = deck(n, 0);
        for _ in 0..100 {
            let before = deck.current_index();
            assert!(deck.shuffle(&mut rng));
            assert_eq!(deck.direction(), Some(Direction::Shuffle));
            settle(&mut deck, &clock);
            assert_ne!(deck.current_index(), before);
        }
    }
}

#[test]
fn test_shuffle_reaches_every_other_card() {
    let mut rng = StdRng::seed_from_u64(11);
    let (mut deck, clock) = deck(4, 0);
    let mut seen = [false; 4];

    for _ in 0..200 {
        deck.shuffle(&mut rng);
        settle(&mut deck, &clock);
        seen[deck.current_index().unwrap()] = true;
    }

    assert!(seen.iter().all(|s| *s));
}

#[test]
fn test_transform_cutoff_through_navigator() {
    for n in 1..=9 {
        let (mut deck, clock) = deck(n, 0);
        for _ in 0..n {
            let current = deck.current_index().unwrap();
            for index in 0..n {
                let distance = transform::cyclic_distance(index, current, n);
                assert_eq!(
                    deck.transform_for(index).is_some(),
                    distance <= MAX_VISIBLE_DISTANCE
                );
            }
            deck.next();
            settle(&mut deck, &clock);
        }
    }
}

#[test]
fn test_current_card_flies_away_while_moving() {
    let (mut deck, _clock) = deck(3, 0);
    assert!(deck.transform_for(0).unwrap().is_identity());

    deck.next();

    let leaving = deck.transform_for(0).unwrap();
    assert_eq!(leaving.opacity, 0.0);
    assert!(leaving.offset_x < 0.0);
}

#[test]
fn test_keyboard_input_drives_navigation() {
    let mapper = InputMapper::default();
    let (mut deck, clock) = deck(3, 0);

    for event in [InputEvent::Key(NavKey::Left), InputEvent::Drag { dx: 10.0, dy: 90.0 }] {
        if let Some(command) = mapper.map(event) {
            deck.handle(command);
        }
        settle(&mut deck, &clock);
    }

    assert_eq!(deck.current_index(), Some(2));
}
