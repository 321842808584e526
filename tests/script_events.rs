use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ghosttype::config::TypingConfig;
use ghosttype::model::Action;
use ghosttype::script::{generate_script, DELETE_DELAY_MS};
use ghosttype::sim;

fn config(
    char_delay: (u64, u64),
    sentence_break: (u64, u64),
    typo_probability: f64,
) -> TypingConfig {
    TypingConfig {
        min_char_delay_ms: char_delay.0,
        max_char_delay_ms: char_delay.1,
        min_sentence_break_ms: sentence_break.0,
        max_sentence_break_ms: sentence_break.1,
        typo_probability,
    }
}

#[test]
fn zero_typo_rate_reconstructs_text_exactly() {
    let text = "The quick brown fox jumps. Over the lazy dog! Right? trailing bit";
    let cfg = config((5, 9), (100, 200), 0.0);

    let mut rng = StdRng::seed_from_u64(1);
    let script = generate_script(text, &cfg, &mut rng).expect("script generation should succeed");

    let typed: String = script
        .actions
        .iter()
        .filter_map(|a| match a {
            Action::Insert { ch } => Some(*ch),
            _ => None,
        })
        .collect();
    assert_eq!(typed, text);

    assert!(
        !script.actions.iter().any(|a| matches!(a, Action::DeleteLast)),
        "expected no deletions with a zero typo rate"
    );
}

#[test]
fn every_sentence_gets_a_break_including_the_last() {
    let text = "Hi. Go!";
    let cfg = config((5, 9), (100, 200), 0.0);

    let mut rng = StdRng::seed_from_u64(2);
    let script = generate_script(text, &cfg, &mut rng).expect("script generation should succeed");

    let keystrokes: Vec<&Action> = script
        .actions
        .iter()
        .filter(|a| !matches!(a, Action::Wait { .. }))
        .collect();

    let expected: Vec<char> = "Hi. Go!".chars().collect();
    let mut expected_idx = 0usize;
    let mut breaks = 0usize;

    for action in &keystrokes {
        match action {
            Action::Insert { ch } => {
                assert_eq!(*ch, expected[expected_idx]);
                expected_idx += 1;
            }
            Action::Break { .. } => {
                breaks += 1;
                // Breaks land exactly after "Hi." and after " Go!".
                assert!(expected_idx == 3 || expected_idx == 7);
            }
            _ => panic!("unexpected action {action:?}"),
        }
    }

    assert_eq!(expected_idx, expected.len());
    assert_eq!(breaks, 2, "expected a break after every sentence");
}

#[test]
fn typo_bursts_are_fully_erased_before_the_correct_char() {
    let text = "Ab c!";
    let cfg = config((5, 9), (50, 80), 1.0);

    let mut rng = StdRng::seed_from_u64(3);
    let script = generate_script(text, &cfg, &mut rng).expect("script generation should succeed");

    let mut events = script
        .actions
        .iter()
        .filter(|a| matches!(a, Action::Insert { .. } | Action::DeleteLast));

    for expected in text.chars() {
        let mut outstanding = 0usize;
        loop {
            match events.next().expect("ran out of keystroke events") {
                Action::Insert { ch } => {
                    if outstanding == 0 && *ch == expected {
                        break;
                    }
                    assert!(ch.is_ascii_lowercase(), "typo {ch:?} must be lowercase");
                    assert_ne!(*ch, expected, "typo must differ from the correct char");
                    outstanding += 1;
                    assert!(outstanding <= 2, "typo bursts are at most 2 chars");
                }
                Action::DeleteLast => {
                    assert!(outstanding > 0, "deletion without a matching typo insert");
                    outstanding -= 1;
                }
                _ => unreachable!(),
            }
        }
        assert_eq!(outstanding, 0);
    }

    assert!(events.next().is_none());
    assert_eq!(sim::replay_text(&script.actions), text);
}

#[test]
fn delays_stay_within_configured_bounds() {
    let text = "Numbers drift. Letters stay!";
    let cfg = config((5, 9), (1_000, 2_000), 1.0);

    let mut rng = StdRng::seed_from_u64(4);
    let script = generate_script(text, &cfg, &mut rng).expect("script generation should succeed");

    for pair in script.actions.windows(2) {
        if let Action::Wait { ms } = pair[0] {
            match pair[1] {
                Action::Insert { .. } => {
                    assert!(
                        (5..=9).contains(&ms),
                        "char delay {ms}ms outside configured range"
                    );
                }
                Action::DeleteLast => {
                    assert_eq!(ms, DELETE_DELAY_MS, "deletions always pace at 100ms");
                }
                _ => {}
            }
        }
    }

    for action in &script.actions {
        if let Action::Break { ms } = action {
            assert!(
                (1_000..=2_000).contains(ms),
                "sentence break {ms}ms outside configured range"
            );
        }
    }
}

#[test]
fn replay_matches_input_at_any_typo_rate() {
    let text = "Mistakes happen. They get fixed!";
    for seed in 0..20 {
        let cfg = config((0, 3), (10, 40), 0.6);
        let mut rng = StdRng::seed_from_u64(seed);
        let script =
            generate_script(text, &cfg, &mut rng).expect("script generation should succeed");
        assert_eq!(sim::replay_text(&script.actions), text);
    }
}

#[test]
fn empty_text_is_a_noop() {
    let cfg = TypingConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    let script = generate_script("", &cfg, &mut rng).expect("script generation should succeed");
    assert!(script.actions.is_empty());
}

#[test]
fn single_char_with_forced_typo_erases_then_types() {
    let cfg = config((5, 5), (10, 10), 1.0);
    let mut rng = StdRng::seed_from_u64(6);
    let script = generate_script("A", &cfg, &mut rng).expect("script generation should succeed");

    let keystrokes: Vec<&Action> = script
        .actions
        .iter()
        .filter(|a| matches!(a, Action::Insert { .. } | Action::DeleteLast))
        .collect();

    // insert typo(s), matching deletes, then the real character.
    let typos = keystrokes
        .iter()
        .take_while(|a| !matches!(a, Action::DeleteLast))
        .count();
    assert!((1..=2).contains(&typos));
    assert_eq!(keystrokes.len(), typos * 2 + 1);
    assert_eq!(*keystrokes[keystrokes.len() - 1], Action::Insert { ch: 'A' });
    for a in &keystrokes[typos..typos * 2] {
        assert_eq!(**a, Action::DeleteLast);
    }
}
