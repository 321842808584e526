use crate::model::{Action, Script};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptStats {
    pub actions: usize,
    pub inserts: usize,
    pub deletions: usize,
    pub total_wait_ms: u64,
}

pub fn stats(script: &Script) -> ScriptStats {
    let mut out = ScriptStats {
        actions: script.actions.len(),
        ..Default::default()
    };

    for a in &script.actions {
        match a {
            Action::Wait { ms } | Action::Break { ms } => {
                out.total_wait_ms = out.total_wait_ms.saturating_add(*ms);
            }
            Action::Insert { .. } => out.inserts += 1,
            Action::DeleteLast => out.deletions += 1,
        }
    }

    out
}

/// Replay the text a script would leave behind.
///
/// Deleting from an empty buffer is a no-op, mirroring how editors treat
/// backspace at the start of a document.
pub fn replay_text(actions: &[Action]) -> String {
    let mut buf: Vec<char> = Vec::new();

    for action in actions {
        match action {
            Action::Insert { ch } => buf.push(*ch),
            Action::DeleteLast => {
                buf.pop();
            }
            Action::Wait { .. } | Action::Break { .. } => {}
        }
    }

    buf.iter().collect()
}
