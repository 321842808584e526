use serde::{Deserialize, Serialize};

use crate::config::TypingConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub version: u32,
    pub config: TypingConfig,
    pub actions: Vec<Action>,
}

/// One step of a typing session, in playback order.
///
/// `Break` sleeps exactly like `Wait` but marks the pause after a sentence,
/// so stats and traces can tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Wait { ms: u64 },
    Break { ms: u64 },
    Insert { ch: char },
    DeleteLast,
}
