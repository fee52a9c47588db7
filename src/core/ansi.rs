//! SGR markup formatter
//!
//! Translates a single display line containing ANSI-style color escape
//! sequences (`ESC [ n(;n)* m`) into styled text segments. The formatter is
//! pure: style state never leaks between calls, so every line starts from an
//! empty style.

/// One of the sixteen standard terminal foreground colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Map an SGR parameter (30-37, 90-97) to a color.
    pub fn from_sgr(code: u16) -> Option<Self> {
        let color = match code {
            30 => Self::Black,
            31 => Self::Red,
            32 => Self::Green,
            33 => Self::Yellow,
            34 => Self::Blue,
            35 => Self::Magenta,
            36 => Self::Cyan,
            37 => Self::White,
            90 => Self::BrightBlack,
            91 => Self::BrightRed,
            92 => Self::BrightGreen,
            93 => Self::BrightYellow,
            94 => Self::BrightBlue,
            95 => Self::BrightMagenta,
            96 => Self::BrightCyan,
            97 => Self::BrightWhite,
            _ => return None,
        };
        Some(color)
    }

    /// Palette index (0-15) for color scheme lookup.
    pub fn index(&self) -> usize {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
            Self::BrightBlack => 8,
            Self::BrightRed => 9,
            Self::BrightGreen => 10,
            Self::BrightYellow => 11,
            Self::BrightBlue => 12,
            Self::BrightMagenta => 13,
            Self::BrightCyan => 14,
            Self::BrightWhite => 15,
        }
    }
}

/// Active style for a text segment.
///
/// Bold is additive; the foreground color is exclusive (a new color code
/// replaces the previous one but leaves bold untouched).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub color: Option<AnsiColor>,
}

impl Style {
    /// Apply a single SGR parameter. Unrecognized codes are ignored.
    fn apply(&mut self, code: u16) {
        match code {
            0 => *self = Self::default(),
            1 => self.bold = true,
            _ => {
                if let Some(color) = AnsiColor::from_sgr(code) {
                    self.color = Some(color);
                }
            }
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text with a fixed style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    fn new(text: &str, style: Style) -> Self {
        Self {
            text: text.to_string(),
            style,
        }
    }
}

/// Split one display line into styled segments.
///
/// A line without any marker yields exactly one unstyled segment containing
/// the line verbatim. A marker with no text before the next marker produces
/// no segment. A malformed or unterminated marker is left verbatim in the
/// output text.
pub fn format_line(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut style = Style::default();
    // Start of text not yet emitted, and where to look for the next marker.
    let mut pending = 0;
    let mut search = 0;
    let mut saw_marker = false;

    while let Some(rel) = line[search..].find('\x1b') {
        let esc = search + rel;
        match parse_marker(&line[esc..]) {
            Some((codes, len)) => {
                saw_marker = true;
                if esc > pending {
                    segments.push(Segment::new(&line[pending..esc], style));
                }
                for code in codes {
                    style.apply(code);
                }
                pending = esc + len;
                search = pending;
            }
            None => {
                // Not a valid marker; the ESC stays in the text.
                search = esc + 1;
            }
        }
    }

    if !saw_marker {
        return vec![Segment::new(line, Style::default())];
    }
    if pending < line.len() {
        segments.push(Segment::new(&line[pending..], style));
    }
    segments
}

/// Parse `ESC [ n(;n)* m` at the start of `s`.
///
/// Returns the parameter list and the byte length of the marker, or `None`
/// when the sequence is unterminated or contains a byte outside `0-9;`.
/// Individual parameters that fail to parse (e.g. the empty string in
/// `ESC[m`) are dropped rather than rejected.
fn parse_marker(s: &str) -> Option<(Vec<u16>, usize)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[1] != b'[' {
        return None;
    }
    let mut i = 2;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' | b';' => i += 1,
            b'm' => {
                let codes = s[2..i]
                    .split(';')
                    .filter_map(|p| p.parse::<u16>().ok())
                    .collect();
                return Some((codes, i + 1));
            }
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Segment {
        Segment::new(text, Style::default())
    }

    #[test]
    fn plain_text_round_trips() {
        assert_eq!(format_line("hello world"), vec![plain("hello world")]);
        assert_eq!(format_line(""), vec![plain("")]);
    }

    #[test]
    fn color_then_reset() {
        let segments = format_line("\x1b[31mHello\x1b[0m World");
        assert_eq!(
            segments,
            vec![
                Segment::new(
                    "Hello",
                    Style {
                        bold: false,
                        color: Some(AnsiColor::Red),
                    }
                ),
                plain(" World"),
            ]
        );
    }

    #[test]
    fn bold_is_additive_with_color() {
        let segments = format_line("\x1b[1m\x1b[96mx");
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].style,
            Style {
                bold: true,
                color: Some(AnsiColor::BrightCyan),
            }
        );
    }

    #[test]
    fn combined_params_in_one_marker() {
        let segments = format_line("\x1b[1;32mok\x1b[0m");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "ok");
        assert!(segments[0].style.bold);
        assert_eq!(segments[0].style.color, Some(AnsiColor::Green));
    }

    #[test]
    fn new_color_replaces_old_but_keeps_bold() {
        let segments = format_line("\x1b[1;31mred\x1b[34mblue");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].style.color, Some(AnsiColor::Red));
        assert_eq!(segments[1].style.color, Some(AnsiColor::Blue));
        assert!(segments[1].style.bold);
    }

    #[test]
    fn unknown_codes_are_ignored() {
        let segments = format_line("\x1b[4mhi\x1b[222mthere");
        assert_eq!(segments.len(), 2);
        assert!(segments[0].style.is_plain());
        assert!(segments[1].style.is_plain());
    }

    #[test]
    fn empty_gap_between_markers_yields_no_segment() {
        let segments = format_line("\x1b[31m\x1b[32mgreen");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "green");
        assert_eq!(segments[0].style.color, Some(AnsiColor::Green));
    }

    #[test]
    fn marker_only_line_yields_nothing() {
        assert!(format_line("\x1b[31m").is_empty());
    }

    #[test]
    fn unterminated_marker_stays_verbatim() {
        // No valid marker at all: whole line passes through untouched.
        assert_eq!(format_line("a\x1b[31b"), vec![plain("a\x1b[31b")]);
        // Valid marker first, then a truncated one at end of line.
        let segments = format_line("\x1b[31mx\x1b[0");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "x\x1b[0");
        assert_eq!(segments[0].style.color, Some(AnsiColor::Red));
    }

    #[test]
    fn empty_param_list_changes_nothing() {
        // `ESC[m` is a marker with no parseable parameters.
        let segments = format_line("\x1b[mtext");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "text");
        assert!(segments[0].style.is_plain());
    }

    #[test]
    fn formatting_is_idempotent() {
        let line = "\x1b[1m\x1b[93mwarn\x1b[0m rest";
        assert_eq!(format_line(line), format_line(line));
    }

    #[test]
    fn bright_color_range_maps() {
        for (code, idx) in [(90u16, 8usize), (97, 15), (30, 0), (37, 7)] {
            let color = AnsiColor::from_sgr(code).unwrap();
            assert_eq!(color.index(), idx);
        }
        assert!(AnsiColor::from_sgr(38).is_none());
        assert!(AnsiColor::from_sgr(29).is_none());
    }
}
