//! Session management
//!
//! The single authoritative state machine behind the terminal UI. It owns the
//! login flag, the command history, the in-progress input line, and the
//! history-recall cursor, and it dispatches submitted lines against the
//! injected [`CommandSet`].
//!
//! No operation here can fail: unknown commands become synthesized history
//! entries, out-of-range navigation is a silent no-op. The renderer observes
//! the session read-only; the only callback out of the core is the
//! best-effort scroll hook fired after each history mutation.

use chrono::{DateTime, Local};

use super::commands::CommandSet;

/// One recorded command submission and its output.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// The command exactly as typed (untrimmed, original casing).
    pub command: String,
    /// Output lines, possibly containing SGR markers. Empty for `^C`.
    pub output: Vec<String>,
    pub timestamp: DateTime<Local>,
}

/// Terminal session state machine.
pub struct Session {
    commands: CommandSet,
    logged_in: bool,
    history: Vec<HistoryEntry>,
    current_input: String,
    /// Recall cursor: `None` when not browsing, `Some(0)` is the newest entry.
    history_index: Option<usize>,
    is_typing: bool,
    /// Invoked after every history mutation; the view uses it to schedule a
    /// scroll-to-bottom. Correctness never depends on it running.
    scroll_hook: Option<Box<dyn FnMut()>>,
}

impl Session {
    pub fn new(commands: CommandSet) -> Self {
        Self {
            commands,
            logged_in: false,
            history: Vec::new(),
            current_input: String::new(),
            history_index: None,
            is_typing: false,
            scroll_hook: None,
        }
    }

    /// Register the deferred scroll side effect.
    pub fn set_scroll_hook(&mut self, hook: impl FnMut() + 'static) {
        self.scroll_hook = Some(Box::new(hook));
    }

    fn notify_scroll(&mut self) {
        if let Some(hook) = &mut self.scroll_hook {
            hook();
        }
    }

    fn reset_input(&mut self) {
        self.current_input.clear();
        self.history_index = None;
        self.is_typing = false;
    }

    /// Log in: flips the state and seeds history with the welcome banner.
    pub fn login(&mut self) {
        let now = Local::now();
        self.logged_in = true;
        self.history = vec![HistoryEntry {
            command: "login".to_string(),
            output: welcome_banner(now),
            timestamp: now,
        }];
        self.reset_input();
        tracing::info!("session logged in");
        self.notify_scroll();
    }

    /// Submit a line of input.
    ///
    /// Matching is done on the trimmed, lowercased text; the history entry
    /// stores the original string. Empty input is a no-op. `clear` and `exit`
    /// are handled before table lookup and never produce an entry.
    pub fn submit(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let lowered = trimmed.to_lowercase();

        match lowered.as_str() {
            "clear" => {
                self.history.clear();
                self.reset_input();
                self.notify_scroll();
            }
            "exit" => {
                tracing::info!("session logged out");
                self.logged_in = false;
                self.history.clear();
                self.reset_input();
                self.notify_scroll();
            }
            _ => {
                tracing::debug!("dispatch: {lowered}");
                let output = match self.commands.get(&lowered) {
                    Some(handler) => handler(),
                    None => vec![
                        format!("shellfolio: {raw}: command not found"),
                        String::new(),
                        "Type 'help' to see available commands.".to_string(),
                    ],
                };
                self.history.push(HistoryEntry {
                    command: raw.to_string(),
                    output,
                    timestamp: Local::now(),
                });
                self.reset_input();
                self.notify_scroll();
            }
        }
    }

    /// Cancel the current input (Ctrl+C). Records a `^C` marker entry and
    /// discards the input without executing it.
    pub fn cancel(&mut self) {
        self.history.push(HistoryEntry {
            command: "^C".to_string(),
            output: Vec::new(),
            timestamp: Local::now(),
        });
        self.reset_input();
        self.notify_scroll();
    }

    /// Recall the next-older command into the input line (Up arrow).
    /// No-op at the oldest entry.
    pub fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.history_index {
            None => 0,
            Some(i) if i + 1 < self.history.len() => i + 1,
            Some(_) => return,
        };
        self.history_index = Some(next);
        // Recall replaces the input but does not count as typing.
        self.current_input = self.history[self.history.len() - 1 - next].command.clone();
    }

    /// Walk back toward the newest entry (Down arrow). Stepping past the
    /// newest entry returns to a blank line.
    pub fn recall_next(&mut self) {
        match self.history_index {
            Some(0) => {
                self.history_index = None;
                self.current_input.clear();
            }
            Some(i) => {
                let next = i - 1;
                self.history_index = Some(next);
                self.current_input =
                    self.history[self.history.len() - 1 - next].command.clone();
            }
            None => {}
        }
    }

    /// Replace the input line wholesale.
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.current_input = text.into();
        self.is_typing = true;
    }

    /// Append one typed character.
    pub fn input_char(&mut self, ch: char) {
        self.current_input.push(ch);
        self.is_typing = true;
    }

    /// Remove the last typed character.
    pub fn backspace(&mut self) {
        self.current_input.pop();
        self.is_typing = true;
    }

    // Read-only view for the renderer.

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }
}

/// Fixed banner shown as the synthesized `login` entry.
fn welcome_banner(now: DateTime<Local>) -> Vec<String> {
    vec![
        "Welcome to MoonShadow Terminal v2.0".to_string(),
        String::new(),
        format!("Last login: {}", now.format("%a %b %e %H:%M:%S %Y")),
        "System: ArchLinux MoonShadow-Edition".to_string(),
        "Kernel: 6.1.0-enhanced-security".to_string(),
        String::new(),
        "Type 'help' to see available commands.".to_string(),
        "Use Ctrl+C to cancel current input.".to_string(),
        String::new(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn greet() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    fn session() -> Session {
        let mut commands = CommandSet::new();
        commands.insert("help", greet);
        let mut session = Session::new(commands);
        session.login();
        session
    }

    #[test]
    fn login_seeds_welcome_entry() {
        let session = session();
        assert!(session.logged_in());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].command, "login");
        assert!(session.history()[0]
            .output
            .iter()
            .any(|l| l.starts_with("Last login:")));
        assert_eq!(session.current_input(), "");
        assert_eq!(session.history_index(), None);
    }

    #[test]
    fn empty_or_whitespace_submission_is_a_noop() {
        let mut session = session();
        for input in ["", "   ", "\t", " \t  "] {
            session.submit(input);
            assert_eq!(session.history().len(), 1, "input {input:?} changed history");
        }
    }

    #[test]
    fn lookup_is_case_insensitive_but_entry_preserves_case() {
        let mut session = session();
        session.submit("HELP");
        let entry = session.history().last().unwrap();
        assert_eq!(entry.command, "HELP");
        assert_eq!(entry.output, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored_for_matching() {
        let mut session = session();
        session.submit("  help  ");
        let entry = session.history().last().unwrap();
        assert_eq!(entry.command, "  help  ");
        assert_eq!(entry.output, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn unknown_command_synthesizes_entry() {
        let mut session = session();
        session.submit("frobnicate");
        let entry = session.history().last().unwrap();
        assert_eq!(entry.command, "frobnicate");
        assert!(entry.output[0].contains("frobnicate"));
        assert!(entry.output[0].contains("command not found"));
        assert_eq!(entry.output[1], "");
        assert!(entry.output[2].contains("help"));
    }

    #[test]
    fn submit_resets_input_state() {
        let mut session = session();
        session.update_input("help");
        assert!(session.is_typing());
        session.submit("help");
        assert_eq!(session.current_input(), "");
        assert_eq!(session.history_index(), None);
        assert!(!session.is_typing());
    }

    #[test]
    fn clear_empties_history_but_stays_logged_in() {
        let mut session = session();
        session.submit("help");
        session.submit("clear");
        assert!(session.logged_in());
        assert!(session.history().is_empty());
        assert_eq!(session.current_input(), "");
    }

    #[test]
    fn exit_logs_out_and_clears_everything() {
        let mut session = session();
        session.submit("help");
        session.submit("exit");
        assert!(!session.logged_in());
        assert!(session.history().is_empty());
        assert_eq!(session.current_input(), "");
        assert_eq!(session.history_index(), None);
    }

    #[test]
    fn clear_and_exit_never_produce_entries() {
        let mut session = session();
        session.submit("CLEAR");
        assert!(session.history().is_empty());
        session.submit("  exit ");
        assert!(session.history().is_empty());
    }

    #[test]
    fn cancel_records_marker_and_discards_input() {
        let mut session = session();
        session.update_input("foo");
        session.cancel();
        let entry = session.history().last().unwrap();
        assert_eq!(entry.command, "^C");
        assert!(entry.output.is_empty());
        assert_eq!(session.current_input(), "");
        assert!(!session.is_typing());
    }

    #[test]
    fn recall_walks_newest_to_oldest_then_stops() {
        let mut session = session();
        session.submit("first");
        session.submit("second");
        session.submit("third");
        // History: login, first, second, third.
        let expected = ["third", "second", "first", "login"];
        for (i, command) in expected.iter().enumerate() {
            session.recall_previous();
            assert_eq!(session.history_index(), Some(i));
            assert_eq!(session.current_input(), *command);
        }
        // One past the oldest: no-op.
        session.recall_previous();
        assert_eq!(session.history_index(), Some(3));
        assert_eq!(session.current_input(), "login");
    }

    #[test]
    fn recall_next_walks_back_to_blank() {
        let mut session = session();
        session.submit("first");
        session.submit("second");
        for _ in 0..session.history().len() {
            session.recall_previous();
        }
        let len = session.history().len();
        for _ in 0..len - 1 {
            session.recall_next();
        }
        assert_eq!(session.history_index(), Some(0));
        assert_eq!(session.current_input(), "second");
        session.recall_next();
        assert_eq!(session.history_index(), None);
        assert_eq!(session.current_input(), "");
        // Already blank: no-op.
        session.recall_next();
        assert_eq!(session.history_index(), None);
    }

    #[test]
    fn recall_on_empty_history_is_a_noop() {
        let mut session = Session::new(CommandSet::new());
        session.recall_previous();
        assert_eq!(session.history_index(), None);
        session.recall_next();
        assert_eq!(session.history_index(), None);
    }

    #[test]
    fn recall_does_not_count_as_typing() {
        let mut session = session();
        session.submit("help");
        assert!(!session.is_typing());
        session.recall_previous();
        assert_eq!(session.current_input(), "help");
        assert!(!session.is_typing());
        session.input_char('!');
        assert!(session.is_typing());
    }

    #[test]
    fn scroll_hook_fires_on_mutations_only() {
        let fired = Rc::new(Cell::new(0u32));
        let mut commands = CommandSet::new();
        commands.insert("help", greet);
        let mut session = Session::new(commands);
        let counter = fired.clone();
        session.set_scroll_hook(move || counter.set(counter.get() + 1));

        session.login();
        assert_eq!(fired.get(), 1);
        session.submit("help");
        assert_eq!(fired.get(), 2);
        session.submit("   ");
        assert_eq!(fired.get(), 2);
        session.cancel();
        assert_eq!(fired.get(), 3);
        session.recall_previous();
        assert_eq!(fired.get(), 3);
        session.submit("clear");
        assert_eq!(fired.get(), 4);
    }

    #[test]
    fn input_editing_helpers() {
        let mut session = session();
        session.input_char('h');
        session.input_char('i');
        assert_eq!(session.current_input(), "hi");
        session.backspace();
        assert_eq!(session.current_input(), "h");
        session.backspace();
        session.backspace();
        assert_eq!(session.current_input(), "");
    }
}
