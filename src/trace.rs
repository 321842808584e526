use crate::model::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    pub action_index: usize,
    pub line: String,
}

/// Precompute console trace events so each line can be printed *before* the
/// actions it describes start executing during playback.
///
/// Consecutive inserts coalesce into one `Typing "..."` line. A run of
/// deletions followed by an insert becomes a `Replace "xq" with "i"` line,
/// keyed to the first deletion. Sentence breaks get their own line.
pub fn script_console_trace(actions: &[Action]) -> Vec<TraceEvent> {
    let mut tracer = Tracer::default();
    for (action_index, action) in actions.iter().enumerate() {
        tracer.observe_action(action_index, action);
    }
    tracer.finish();

    tracer.events.sort_by_key(|event| event.action_index);
    tracer.events
}

pub fn print_trace_line(line: &str) {
    const RESET: &str = "\x1b[0m";
    const TYPING: &str = "\x1b[34m";
    const REPLACE: &str = "\x1b[33m";

    if let Some(rest) = line.strip_prefix("Typing") {
        eprintln!("{TYPING}Typing{RESET}{rest}");
    } else if let Some(rest) = line.strip_prefix("Replace") {
        eprintln!("{REPLACE}Replace{RESET}{rest}");
    } else {
        eprintln!("{line}");
    }
}

#[derive(Debug, Default)]
struct Tracer {
    run: String,
    run_start: Option<usize>,
    erased: Vec<char>,
    erase_start: Option<usize>,
    events: Vec<TraceEvent>,
}

impl Tracer {
    fn observe_action(&mut self, action_index: usize, action: &Action) {
        match action {
            Action::Insert { ch } => {
                if !self.erased.is_empty() {
                    self.finish_replace(*ch);
                    return;
                }
                if self.run.is_empty() {
                    self.run_start = Some(action_index);
                }
                self.run.push(*ch);
            }
            Action::DeleteLast => {
                if let Some(c) = self.run.pop() {
                    if self.erased.is_empty() {
                        self.erase_start = Some(action_index);
                    }
                    // Deletions walk backwards; keep typed order for display.
                    self.erased.insert(0, c);
                }
            }
            Action::Break { ms } => {
                self.flush_run();
                self.events.push(TraceEvent {
                    action_index,
                    line: format!("Break for {:.1}s...", *ms as f64 / 1000.0),
                });
            }
            Action::Wait { .. } => {}
        }
    }

    fn finish(&mut self) {
        // A generated script never ends mid-correction, but don't lose one.
        if !self.erased.is_empty() {
            let wrong: String = self.erased.drain(..).collect();
            let action_index = self.erase_start.take().unwrap_or(0);
            self.events.push(TraceEvent {
                action_index,
                line: format!("Erase \"{}\"...", escape_for_log(&wrong)),
            });
        }
        self.flush_run();
    }

    fn finish_replace(&mut self, correct: char) {
        let wrong: String = self.erased.drain(..).collect();
        let action_index = self.erase_start.take().unwrap_or(0);
        self.events.push(TraceEvent {
            action_index,
            line: format!(
                "Replace \"{}\" with \"{}\"...",
                escape_for_log(&wrong),
                escape_for_log(&correct.to_string())
            ),
        });
    }

    fn flush_run(&mut self) {
        if self.run.is_empty() {
            self.run_start = None;
            return;
        }
        let Some(start) = self.run_start.take() else {
            self.run.clear();
            return;
        };
        self.events.push(TraceEvent {
            action_index: start,
            line: format!("Typing \"{}\"...", escape_for_log(&self.run)),
        });
        self.run.clear();
    }
}

fn escape_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
