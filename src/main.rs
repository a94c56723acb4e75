use std::io;
use std::str::FromStr;

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use noteit_app::App;
use noteit_clipboard::SystemClipboard;
use noteit_config::Config;
use noteit_logger::{self as logger, LogLevel};

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not load config: {e}. Using defaults.");
        Config::default()
    });

    let min_level = LogLevel::from_str(&config.logging.min_level).unwrap_or(LogLevel::Info);
    logger::init(config.log_file_path(), min_level);
    logger::info("Application started");

    let mut app = App::new(config, Box::new(SystemClipboard::new()));

    enable_raw_mode()?;
    let mut stdout = io::stdout();

    // Kitty protocol lets Ctrl+Tab and Ctrl+Shift+<letter> through
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);

    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        logger::error(format!("Fatal: {err:?}"));
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
