//! Terminal renderer using crossterm
//!
//! Draws the two views of the application: the login screen and the session
//! view (history, prompt, input line). The renderer owns the view scroll
//! offset; the session itself knows nothing about scrolling beyond firing
//! its hook after history mutations.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::config::{ColorScheme, Config};
use crate::core::ansi::{self, Style};
use crate::core::session::Session;

/// A run of styled text ready for drawing.
#[derive(Clone, Debug)]
struct Span {
    text: String,
    color: Color,
    bold: bool,
}

impl Span {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    fn bold(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            bold: true,
        }
    }
}

/// One visual row.
type Line = Vec<Span>;

/// Terminal renderer
pub struct Renderer {
    scheme: ColorScheme,
    /// Lines scrolled up from the bottom (0 = live view)
    scroll_offset: usize,
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::with_color_scheme(ColorScheme::default())
    }
}

impl Renderer {
    pub fn with_color_scheme(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            scroll_offset: 0,
            initialized: false,
        }
    }

    /// Current terminal size (cols, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        self.initialized = true;
        Ok(())
    }

    /// Cleanup the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(
            stdout,
            Show,
            EnableLineWrap,
            DisableBracketedPaste,
            DisableMouseCapture
        );
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();

        terminal::disable_raw_mode()?;
        println!();
        Ok(())
    }

    /// Scroll the view up (into older output)
    pub fn scroll_up(&mut self, n: usize) {
        // Clamped against the actual line count at render time.
        self.scroll_offset = self.scroll_offset.saturating_add(n);
    }

    /// Scroll the view down (toward the live view)
    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    /// Return to the live view
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll_offset > 0
    }

    /// Render the current view
    pub fn render(&mut self, session: &Session, config: &Config) -> io::Result<()> {
        let (cols, rows) = Self::size()?;
        if session.logged_in() {
            self.render_session(session, config, cols, rows)
        } else {
            self.render_login(config, cols, rows)
        }
    }

    /// Session view: scrolled history, prompt line, footer.
    fn render_session(
        &mut self,
        session: &Session,
        config: &Config,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        let lines = self.session_lines(session, config);

        // Last row is the footer; the rest is the scrollable area.
        let view_rows = rows.saturating_sub(1) as usize;
        let max_scroll = lines.len().saturating_sub(view_rows);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        let first = lines
            .len()
            .saturating_sub(view_rows + self.scroll_offset);

        let mut stdout = io::stdout();
        queue!(stdout, SetBackgroundColor(self.scheme.background.to_crossterm()))?;

        for y in 0..view_rows {
            queue!(stdout, MoveTo(0, y as u16), Clear(ClearType::UntilNewLine))?;
            if let Some(line) = lines.get(first + y) {
                self.draw_line(&mut stdout, line, cols)?;
            }
        }

        let footer = if self.is_scrolled() {
            format!("[{} lines above] ↑/↓ history · Ctrl+C cancel · Ctrl+Q quit", self.scroll_offset)
        } else {
            "↑/↓ history · Ctrl+C cancel · 'help' for commands · Ctrl+Q quit".to_string()
        };
        queue!(
            stdout,
            MoveTo(0, rows.saturating_sub(1)),
            Clear(ClearType::UntilNewLine)
        )?;
        self.draw_line(
            &mut stdout,
            &vec![Span::new(footer, self.scheme.muted.to_crossterm())],
            cols,
        )?;

        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    /// Login view: centered banner and hints.
    fn render_login(&mut self, config: &Config, cols: u16, rows: u16) -> io::Result<()> {
        let accent = self.scheme.accent.to_crossterm();
        let fg = self.scheme.foreground.to_crossterm();
        let muted = self.scheme.muted.to_crossterm();

        let mut lines: Vec<Line> = Vec::new();
        for row in BANNER_ART {
            lines.push(vec![Span::bold(*row, accent)]);
        }
        lines.push(Vec::new());
        lines.push(vec![Span::bold("MoonShadow Terminal Interface", fg)]);
        lines.push(vec![Span::new("Interactive Portfolio System v2.0", muted)]);
        lines.push(Vec::new());
        lines.push(vec![Span::new(
            format!("{}-terminal login:", config.user),
            fg,
        )]);
        lines.push(vec![Span::new(
            "Press Enter to access the interactive terminal",
            muted,
        )]);
        lines.push(Vec::new());
        lines.push(vec![Span::new("System: ArchLinux MoonShadow-Edition", muted)]);
        lines.push(vec![Span::new("Kernel: 6.1.0-enhanced-security", muted)]);
        lines.push(Vec::new());
        lines.push(vec![
            Span::bold("[Enter]", accent),
            Span::new(" log in    ", fg),
            Span::bold("[q]", accent),
            Span::new(" quit", fg),
        ]);

        let top = (rows as usize).saturating_sub(lines.len()) / 2;

        let mut stdout = io::stdout();
        queue!(
            stdout,
            SetBackgroundColor(self.scheme.background.to_crossterm()),
            Clear(ClearType::All)
        )?;
        for (i, line) in lines.iter().enumerate() {
            let y = top + i;
            if y >= rows as usize {
                break;
            }
            let width: usize = line.iter().map(|s| s.text.width()).sum();
            let x = (cols as usize).saturating_sub(width) / 2;
            queue!(stdout, MoveTo(x as u16, y as u16))?;
            self.draw_line(&mut stdout, line, cols)?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    /// Flatten the session into visual rows.
    fn session_lines(&self, session: &Session, config: &Config) -> Vec<Line> {
        let prompt_color = self.scheme.prompt.to_crossterm();
        let fg = self.scheme.foreground.to_crossterm();

        let mut lines = Vec::new();
        for entry in session.history() {
            lines.push(vec![
                Span::bold(config.prompt(), prompt_color),
                Span::new(" ", fg),
                Span::new(entry.command.clone(), fg),
            ]);
            for output_line in &entry.output {
                let mut line = vec![Span::new("  ", fg)];
                for segment in ansi::format_line(output_line) {
                    line.push(self.resolve(segment.text, segment.style));
                }
                lines.push(line);
            }
            lines.push(Vec::new());
        }

        // Live input line with a block cursor.
        lines.push(vec![
            Span::bold(config.prompt(), prompt_color),
            Span::new(" ", fg),
            Span::new(session.current_input().to_string(), fg),
            Span::new("█", self.scheme.accent.to_crossterm()),
        ]);
        lines
    }

    /// Map an abstract segment style onto the active color scheme.
    fn resolve(&self, text: String, style: Style) -> Span {
        let color = match style.color {
            Some(tag) => self.scheme.ansi[tag.index()].to_crossterm(),
            None => self.scheme.foreground.to_crossterm(),
        };
        Span {
            text,
            color,
            bold: style.bold,
        }
    }

    /// Draw one line at the current cursor position, truncated to `cols`.
    fn draw_line(&self, stdout: &mut impl Write, line: &Line, cols: u16) -> io::Result<()> {
        let mut budget = cols as usize;
        for span in line {
            if budget == 0 {
                break;
            }
            let text = truncate_to_width(&span.text, budget);
            if text.is_empty() {
                continue;
            }
            budget -= text.width();
            queue!(stdout, SetForegroundColor(span.color))?;
            if span.bold {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(stdout, Print(&text))?;
            if span.bold {
                queue!(stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
        }
        Ok(())
    }
}

/// Cut `text` so its display width fits in `width` columns.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Login banner, block-font "MOON".
const BANNER_ART: &[&str] = &[
    "███╗   ███╗ ██████╗  ██████╗ ███╗   ██╗",
    "████╗ ████║██╔═══██╗██╔═══██╗████╗  ██║",
    "██╔████╔██║██║   ██║██║   ██║██╔██╗ ██║",
    "██║╚██╔╝██║██║   ██║██║   ██║██║╚██╗██║",
    "██║ ╚═╝ ██║╚██████╔╝╚██████╔╝██║ ╚████║",
    "╚═╝     ╚═╝ ╚═════╝  ╚═════╝ ╚═╝  ╚═══╝",
    "s h a d o w   t e r m i n a l",
];
