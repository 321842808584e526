use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::model::{Action, Script};
use crate::surface::TextSurface;
use crate::trace::{print_trace_line, script_console_trace};

/// Shared cancellation token. Settable from any thread; the runner polls it
/// before each action and between sleep slices.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    /// A session was already running; the request was ignored.
    Busy,
}

/// Runs scripts against a surface.
///
/// Clones share the same session state: only one session may be active at a
/// time, and a `play` call while one is running reports `Outcome::Busy`
/// without touching the active session. Both the in-progress flag and the
/// cancel flag are reset when a session ends, whatever the exit path.
#[derive(Debug, Clone, Default)]
pub struct Player {
    in_progress: Arc<AtomicBool>,
    cancel: CancelFlag,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for cancelling the active session from another thread or a
    /// signal handler.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Execute a script. Cancellation already pending at entry means the
    /// session never starts: nothing is dispatched and the in-progress flag
    /// is never raised.
    pub fn play(
        &self,
        script: &Script,
        surface: &mut dyn TextSurface,
        countdown_secs: u64,
        trace: bool,
    ) -> Result<Outcome> {
        if self.cancel.is_set() {
            self.cancel.clear();
            return Ok(Outcome::Cancelled);
        }

        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(Outcome::Busy);
        }
        let _session = SessionGuard { player: self };

        if countdown_secs > 0 {
            eprintln!("Focus the target input. Starting in {countdown_secs}s...");
            for remaining in (1..=countdown_secs).rev() {
                if self.cancel.is_set() {
                    return Ok(Outcome::Cancelled);
                }
                eprintln!("{remaining}...");
                sleep_interruptible(&self.cancel, 1000);
            }
        }

        let trace_events = trace.then(|| script_console_trace(&script.actions));
        let mut next_trace_event = 0usize;

        for (action_index, action) in script.actions.iter().enumerate() {
            if self.cancel.is_set() {
                return Ok(Outcome::Cancelled);
            }

            if let Some(events) = &trace_events {
                while next_trace_event < events.len()
                    && events[next_trace_event].action_index == action_index
                {
                    print_trace_line(&events[next_trace_event].line);
                    next_trace_event += 1;
                }
            }

            match action {
                Action::Wait { ms } | Action::Break { ms } => {
                    sleep_interruptible(&self.cancel, *ms);
                }
                Action::Insert { ch } => surface.insert_char(*ch)?,
                Action::DeleteLast => surface.delete_last()?,
            }
        }

        if self.cancel.is_set() {
            return Ok(Outcome::Cancelled);
        }
        Ok(Outcome::Completed)
    }
}

struct SessionGuard<'a> {
    player: &'a Player,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.player.cancel.clear();
        self.player.in_progress.store(false, Ordering::SeqCst);
    }
}

/// Sleep in slices of at most 50ms so a cancellation never waits on a long
/// delay. A slice already underway completes before the next poll.
fn sleep_interruptible(cancel: &CancelFlag, ms: u64) {
    let mut remaining = ms;
    while remaining > 0 {
        if cancel.is_set() {
            return;
        }
        let step = remaining.min(50);
        std::thread::sleep(Duration::from_millis(step));
        remaining -= step;
    }
}
