use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal
/// Note: Mouse capture is NOT enabled; the client is keyboard-only
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    // Explicitly disable mouse tracking with ANSI escape sequences
    print!("\x1b[?1000l"); // X11 mouse reporting
    print!("\x1b[?1002l"); // cell motion tracking
    print!("\x1b[?1003l"); // all motion tracking
    print!("\x1b[?1006l"); // SGR extended mode
    io::stdout().flush()?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run `restore` whatever `outcome` holds. A loop error wins over a restore error.
pub fn finish<T>(outcome: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    let restored = restore();
    let value = outcome?;
    restored?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn test_finish_restores_after_loop_error() {
        let restored = Cell::new(false);
        let outcome: Result<()> = Err(anyhow!("draw failed"));

        let result = finish(outcome, || {
            restored.set(true);
            Ok(())
        });

        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn test_finish_reports_restore_error_after_clean_exit() {
        let result = finish(Ok(()), || Err(anyhow!("leave screen failed")));
        assert_eq!(result.unwrap_err().to_string(), "leave screen failed");
    }
}
