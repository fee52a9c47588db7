//! Built-in portfolio commands
//!
//! The command table is a fixed mapping from lowercase command name to a
//! zero-argument handler producing output lines. Handlers embed SGR color
//! markers which the renderer feeds through [`crate::core::ansi`].
//!
//! `clear` and `exit` are deliberately absent: the session intercepts them
//! before table lookup.

use std::collections::BTreeMap;

/// A command handler: no input, a list of output lines.
pub type CommandFn = fn() -> Vec<String>;

/// Static command name -> handler mapping.
pub struct CommandSet {
    table: BTreeMap<String, CommandFn>,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandSet {
    /// An empty table (used by tests to inject custom handlers).
    pub fn new() -> Self {
        Self {
            table: BTreeMap::new(),
        }
    }

    /// The full built-in portfolio command set.
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.insert("help", help);
        set.insert("about", about);
        set.insert("whoami", whoami);
        set.insert("skills", skills);
        set.insert("projects", projects);
        set.insert("experience", experience);
        set.insert("contact", contact);
        set.insert("neofetch", neofetch);
        set
    }

    pub fn insert(&mut self, name: &str, handler: CommandFn) {
        self.table.insert(name.to_lowercase(), handler);
    }

    /// Look up a handler by its already trimmed, lowercased name.
    pub fn get(&self, name: &str) -> Option<CommandFn> {
        self.table.get(name).copied()
    }

    /// Command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn help() -> Vec<String> {
    vec![
        "\x1b[1;96mAvailable commands\x1b[0m".into(),
        "".into(),
        "  \x1b[92mabout\x1b[0m       who is behind this terminal".into(),
        "  \x1b[92mwhoami\x1b[0m      current user".into(),
        "  \x1b[92mskills\x1b[0m      languages and tooling".into(),
        "  \x1b[92mprojects\x1b[0m    selected work".into(),
        "  \x1b[92mexperience\x1b[0m  where I have worked".into(),
        "  \x1b[92mcontact\x1b[0m     how to reach me".into(),
        "  \x1b[92mneofetch\x1b[0m    system information".into(),
        "  \x1b[92mhelp\x1b[0m        this list".into(),
        "".into(),
        "  \x1b[90mclear\x1b[0m       wipe the screen".into(),
        "  \x1b[90mexit\x1b[0m        log out".into(),
        "".into(),
        "Use \x1b[93mUp\x1b[0m/\x1b[93mDown\x1b[0m to browse history, \x1b[93mCtrl+C\x1b[0m to cancel input.".into(),
    ]
}

fn about() -> Vec<String> {
    vec![
        "\x1b[1;95mMoonShadow\x1b[0m — systems developer, night owl.".into(),
        "".into(),
        "I build terminal software, network tooling, and the occasional".into(),
        "security experiment. This portfolio is itself a small terminal:".into(),
        "everything you see is driven by a tiny command interpreter.".into(),
        "".into(),
        "Type \x1b[92mprojects\x1b[0m to see what I have been up to.".into(),
    ]
}

fn whoami() -> Vec<String> {
    vec!["moonshadow".into()]
}

fn skills() -> Vec<String> {
    vec![
        "\x1b[1;96mLanguages\x1b[0m".into(),
        "  \x1b[92m■■■■■■■■■□\x1b[0m Rust".into(),
        "  \x1b[92m■■■■■■■■□□\x1b[0m C".into(),
        "  \x1b[93m■■■■■■■□□□\x1b[0m Python".into(),
        "  \x1b[93m■■■■■■□□□□\x1b[0m TypeScript".into(),
        "".into(),
        "\x1b[1;96mTooling\x1b[0m".into(),
        "  git, tmux, wireshark, qemu, nvim".into(),
        "".into(),
        "\x1b[1;96mInterests\x1b[0m".into(),
        "  terminal emulators, protocol parsing, embedded Linux".into(),
    ]
}

fn projects() -> Vec<String> {
    vec![
        "\x1b[1;96mSelected projects\x1b[0m".into(),
        "".into(),
        "\x1b[1;92mshellfolio\x1b[0m \x1b[90m(you are here)\x1b[0m".into(),
        "  A fake login shell that answers questions about its author.".into(),
        "".into(),
        "\x1b[1;92mpacketloom\x1b[0m".into(),
        "  Streaming pcap dissector with a query language for captures.".into(),
        "".into(),
        "\x1b[1;92mlumen\x1b[0m".into(),
        "  E-ink status display driven by a Raspberry Pi Zero.".into(),
        "".into(),
        "Source for all of these lives at \x1b[94mgithub.com/moonshadow\x1b[0m.".into(),
    ]
}

fn experience() -> Vec<String> {
    vec![
        "\x1b[1;96mExperience\x1b[0m".into(),
        "".into(),
        "\x1b[1m2022 — now\x1b[0m   Senior systems engineer, Nightline Networks".into(),
        "  Packet processing pipeline, 40G line rate, mostly Rust.".into(),
        "".into(),
        "\x1b[1m2019 — 2022\x1b[0m  Embedded developer, Lumen Labs".into(),
        "  Yocto-based firmware for industrial sensors.".into(),
        "".into(),
        "\x1b[1m2017 — 2019\x1b[0m  Junior developer, freelance".into(),
        "  Web backends and the occasional kernel module.".into(),
    ]
}

fn contact() -> Vec<String> {
    vec![
        "\x1b[1;96mContact\x1b[0m".into(),
        "".into(),
        "  email    \x1b[94mmoonshadow@nightline.dev\x1b[0m".into(),
        "  github   \x1b[94mgithub.com/moonshadow\x1b[0m".into(),
        "  matrix   \x1b[94m@moonshadow:matrix.org\x1b[0m".into(),
        "".into(),
        "PGP key on request. Response time measured in moon phases.".into(),
    ]
}

fn neofetch() -> Vec<String> {
    vec![
        "\x1b[1;95m       ▄▄▄       \x1b[0m  \x1b[1mmoonshadow\x1b[0m@\x1b[1mportfolio\x1b[0m".into(),
        "\x1b[1;95m    ▄█████████▄  \x1b[0m  ─────────────────────".into(),
        "\x1b[1;95m   ████████▀▀▀   \x1b[0m  \x1b[96mOS\x1b[0m      ArchLinux MoonShadow-Edition".into(),
        "\x1b[1;95m  ████████       \x1b[0m  \x1b[96mKernel\x1b[0m  6.1.0-enhanced-security".into(),
        "\x1b[1;95m   ████████▄▄▄   \x1b[0m  \x1b[96mShell\x1b[0m   shellfolio".into(),
        "\x1b[1;95m    ▀█████████▀  \x1b[0m  \x1b[96mUptime\x1b[0m  since last login".into(),
        "\x1b[1;95m       ▀▀▀       \x1b[0m  \x1b[96mTheme\x1b[0m   phosphor on black".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ansi::format_line;

    #[test]
    fn builtin_contains_expected_commands() {
        let set = CommandSet::builtin();
        for name in [
            "help",
            "about",
            "whoami",
            "skills",
            "projects",
            "experience",
            "contact",
            "neofetch",
        ] {
            assert!(set.get(name).is_some(), "missing command {name}");
        }
        // Session-level specials are never table entries.
        assert!(set.get("clear").is_none());
        assert!(set.get("exit").is_none());
        assert_eq!(set.len(), 8);
        assert!(!set.is_empty());
        assert!(CommandSet::new().is_empty());
    }

    #[test]
    fn every_handler_produces_output() {
        let set = CommandSet::builtin();
        for name in set.names() {
            let handler = set.get(name).unwrap();
            assert!(!handler().is_empty(), "{name} produced no output");
        }
    }

    #[test]
    fn handler_markup_parses_cleanly() {
        // No handler line may contain a malformed marker: after formatting,
        // no segment text should retain an ESC byte.
        let set = CommandSet::builtin();
        for name in set.names().collect::<Vec<_>>() {
            for line in set.get(name).unwrap()() {
                for segment in format_line(&line) {
                    assert!(
                        !segment.text.contains('\x1b'),
                        "unparsed marker in output of {name}: {line:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn lookup_is_exact_on_lowercase_names() {
        let set = CommandSet::builtin();
        assert!(set.get("help").is_some());
        // Normalization happens in the session, not here.
        assert!(set.get("HELP").is_none());
        assert!(set.get(" help").is_none());
    }
}
