use anyhow::{anyhow, Result};
use rand::Rng;

use crate::config::TypingConfig;
use crate::model::{Action, Script};
use crate::sim::replay_text;

pub const SCRIPT_VERSION: u32 = 1;

/// Corrective deletions always pace at this delay, independent of config.
pub const DELETE_DELAY_MS: u64 = 100;

/// Split text into sentences. A sentence runs up to and including the next
/// `.`, `!` or `?`; a trailing fragment without a terminator is its own
/// sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0usize;

    for (idx, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = idx + c.len_utf8();
            sentences.push(&text[start..end]);
            start = end;
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Draw 1 or 2 wrong characters to slip in before `correct`. Each is a
/// lowercase Latin letter, resampled until it differs from `correct`.
fn typo_burst(correct: char, rng: &mut impl Rng) -> Vec<char> {
    let len = if rng.gen_bool(0.5) { 1 } else { 2 };
    let mut typos = Vec::with_capacity(len);

    for _ in 0..len {
        let typo = loop {
            let candidate = (b'a' + rng.gen_range(0u8..26)) as char;
            if candidate != correct {
                break candidate;
            }
        };
        typos.push(typo);
    }

    typos
}

#[derive(Debug, Default)]
struct ActionBuilder {
    actions: Vec<Action>,
}

impl ActionBuilder {
    fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    fn wait(&mut self, ms: u64) {
        if ms == 0 {
            return;
        }
        self.actions.push(Action::Wait { ms });
    }

    fn sentence_break(&mut self, ms: u64) {
        self.actions.push(Action::Break { ms });
    }

    fn insert(&mut self, ch: char) {
        self.actions.push(Action::Insert { ch });
    }

    fn delete_last(&mut self) {
        self.actions.push(Action::DeleteLast);
    }
}

/// Turn `text` into a time-ordered action script.
///
/// Every character gets a fresh uniform delay draw. With the configured
/// probability, a typo burst is emitted first: each wrong character typed at
/// the drawn delay, then erased at the fixed 100ms pace, before the correct
/// character lands. Every sentence, including the last, is followed by a
/// `Break` drawn from the sentence-break range.
pub fn generate_script(text: &str, config: &TypingConfig, rng: &mut impl Rng) -> Result<Script> {
    let config = config.normalized();
    let mut builder = ActionBuilder::default();

    for sentence in split_sentences(text) {
        for ch in sentence.chars() {
            let delay = rng.gen_range(config.min_char_delay_ms..=config.max_char_delay_ms);

            if rng.gen_bool(config.typo_probability) {
                let typos = typo_burst(ch, rng);
                for typo in &typos {
                    builder.wait(delay);
                    builder.insert(*typo);
                }
                for _ in &typos {
                    builder.wait(DELETE_DELAY_MS);
                    builder.delete_last();
                }
            }

            builder.wait(delay);
            builder.insert(ch);
        }

        let break_ms =
            rng.gen_range(config.min_sentence_break_ms..=config.max_sentence_break_ms);
        builder.sentence_break(break_ms);
    }

    let actions = builder.into_actions();

    if replay_text(&actions) != text {
        return Err(anyhow!(
            "script bug: replayed actions do not reproduce the input text"
        ));
    }

    Ok(Script {
        version: SCRIPT_VERSION,
        config,
        actions,
    })
}
