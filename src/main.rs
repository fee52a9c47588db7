//! shellfolio - an interactive portfolio styled as a login shell
//!
//! shellfolio draws a fake login screen, then drops into a simulated
//! shell whose commands answer questions about its author. Nothing is
//! executed: every command is a lookup in a static table.
//!
//! # Quick Start
//!
//! ```text
//! shellfolio             # Start with the theme from config.toml
//! shellfolio -t dracula  # Start with a specific theme
//! ```
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter | Submit the input line (log in on the login screen) |
//! | Up/Down | Recall command history |
//! | Ctrl+C | Cancel the input line |
//! | Shift+PageUp/PageDown, mouse wheel | Scroll output |
//! | Ctrl+Q | Quit |

mod config;
mod core;
mod ui;

use std::cell::Cell;
use std::env;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{ColorScheme, Config};
use crate::core::commands::CommandSet;
use crate::core::session::Session;
use crate::ui::Renderer;

/// Command line options
struct Options {
    /// Theme override from the command line
    theme: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self { theme: None }
    }
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("shellfolio {}", VERSION);
}

fn print_help() {
    eprintln!("shellfolio {} - an interactive portfolio styled as a login shell", VERSION);
    eprintln!();
    eprintln!("Usage: shellfolio [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --theme <NAME>    Color scheme (overrides config.toml)");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keybindings:");
    eprintln!("  Enter                 Submit input (log in on the login screen)");
    eprintln!("  Up/Down               Recall command history");
    eprintln!("  Ctrl+C                Cancel the input line");
    eprintln!("  Shift+PageUp/Down     Scroll output (mouse wheel works too)");
    eprintln!("  Ctrl+Q                Quit");
    eprintln!();
    eprintln!("Configuration: ~/.shellfolio/config.toml");
    eprintln!();
    eprintln!("Color schemes: {}", ColorScheme::list().join(", "));
    eprintln!();
    eprintln!("Exit: type 'exit' to log out, Ctrl+Q to quit");
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-t" | "--theme" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing theme argument".to_string());
                }
                options.theme = Some(args[i].clone());
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn init_logging() {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from);

    let log_path = home
        .map(|h| h.join(".shellfolio").join("shellfolio.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("shellfolio.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::INFO)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("shellfolio starting...");

    let config = Config::load();
    let scheme = match options.theme {
        Some(ref name) => ColorScheme::by_name(name),
        None => config.get_color_scheme(),
    };
    info!("Color scheme: {}", scheme.name);

    let (cols, rows) = Renderer::size()?;
    info!("Terminal size: {}x{}", cols, rows);

    let mut session = Session::new(CommandSet::builtin());

    // History mutations request a jump back to the live view.
    let scroll_pending = Rc::new(Cell::new(false));
    {
        let flag = Rc::clone(&scroll_pending);
        session.set_scroll_hook(move || flag.set(true));
    }

    let mut renderer = Renderer::with_color_scheme(scheme);
    renderer.init()?;

    let result = run_main_loop(&mut session, &mut renderer, &config, &scroll_pending);

    let _ = renderer.cleanup();
    info!("shellfolio exiting");
    result
}

/// Main event loop. Blocks on input; redraws only after state changes.
fn run_main_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    config: &Config,
    scroll_pending: &Rc<Cell<bool>>,
) -> anyhow::Result<()> {
    renderer.render(session, config)?;

    loop {
        let mut needs_redraw = false;

        match event::read()? {
            Event::Key(key_event) => {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+Q always quits.
                if key_event.modifiers.contains(KeyModifiers::CONTROL)
                    && key_event.code == KeyCode::Char('q')
                {
                    info!("Quit requested");
                    break;
                }

                if !session.logged_in() {
                    match key_event.code {
                        KeyCode::Enter => {
                            session.login();
                            needs_redraw = true;
                        }
                        KeyCode::Char('q') | KeyCode::Esc => {
                            break;
                        }
                        _ => {}
                    }
                } else {
                    // Scrollback keys (Shift+PageUp/PageDown)
                    if key_event.modifiers.contains(KeyModifiers::SHIFT) {
                        match key_event.code {
                            KeyCode::PageUp => {
                                renderer.scroll_up(10);
                                renderer.render(session, config)?;
                                continue;
                            }
                            KeyCode::PageDown => {
                                renderer.scroll_down(10);
                                renderer.render(session, config)?;
                                continue;
                            }
                            _ => {}
                        }
                    }

                    match key_event.code {
                        KeyCode::Enter => {
                            let line = session.current_input().to_string();
                            session.submit(&line);
                            needs_redraw = true;
                        }
                        KeyCode::Char('c')
                            if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            session.cancel();
                            needs_redraw = true;
                        }
                        KeyCode::Up => {
                            session.recall_previous();
                            needs_redraw = true;
                        }
                        KeyCode::Down => {
                            session.recall_next();
                            needs_redraw = true;
                        }
                        KeyCode::Backspace => {
                            session.backspace();
                            needs_redraw = true;
                        }
                        KeyCode::Char(c) => {
                            session.input_char(c);
                            needs_redraw = true;
                        }
                        _ => {}
                    }
                }
            }

            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => {
                    renderer.scroll_up(3);
                    needs_redraw = true;
                }
                MouseEventKind::ScrollDown => {
                    renderer.scroll_down(3);
                    needs_redraw = true;
                }
                _ => {}
            },

            Event::Paste(text) => {
                let line = format!("{}{}", session.current_input(), text);
                session.update_input(line);
                needs_redraw = true;
            }

            Event::Resize(cols, rows) => {
                info!("Resize: {}x{}", cols, rows);
                needs_redraw = true;
            }

            _ => {}
        }

        // A history mutation happened: snap back to the live view.
        if scroll_pending.take() {
            renderer.scroll_to_bottom();
        }

        if needs_redraw {
            renderer.render(session, config)?;
        }
    }

    Ok(())
}
