//! Terminal driver for the selector
//!
//! Draws on `/dev/tty` rather than stdout, which belongs to the shell
//! wrapper evaluating our output.

use super::events::{EventResult, translate};
use super::outcome::Outcome;
use super::state::Selector;
use super::theme::Theme;
use super::view::SelectorView;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};

type TtyTerminal = Terminal<CrosstermBackend<File>>;

/// Run `selector` interactively until it produces an outcome
///
/// The terminal is restored before returning, including on error.
///
/// # Errors
///
/// Returns an I/O error if the tty cannot be opened or drawn to.
pub fn run(mut selector: Selector, theme: &Theme) -> io::Result<Outcome> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut selector, theme);
    let cleanup = cleanup_terminal(&mut terminal);

    result?;
    cleanup?;
    Ok(selector.into_outcome().unwrap_or(Outcome::Cancel))
}

/// Setup terminal for the selector
fn setup_terminal() -> io::Result<TtyTerminal> {
    let mut tty = OpenOptions::new().read(true).write(true).open("/dev/tty")?;
    let mut fallback = tty.try_clone()?;
    enable_raw_mode()?;

    execute!(tty, EnterAlternateScreen, Hide)
        .and_then(|()| Terminal::new(CrosstermBackend::new(tty)))
        .inspect_err(|_| {
            let _ = restore(&mut fallback);
        })
}

/// Cleanup terminal after the selector
fn cleanup_terminal(terminal: &mut TtyTerminal) -> io::Result<()> {
    restore(terminal.backend_mut())
}

/// Leave raw mode and the alternate screen, showing the cursor again
fn restore(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, LeaveAlternateScreen, Show)?;
    Ok(())
}

fn run_loop(terminal: &mut TtyTerminal, selector: &mut Selector, theme: &Theme) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            frame.render_widget(SelectorView::new(selector, theme), frame.area());
        })?;

        // Resize needs no handling beyond the redraw above
        if let Event::Key(key) = event::read()?
            && let Some(input) = translate(&key)
            && selector.handle(input) == EventResult::Finished
        {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_leaves_alternate_screen() {
        let mut out = Vec::new();
        restore(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "{written:?}");
        assert!(written.contains("\x1b[?25h"), "{written:?}");
    }
}
