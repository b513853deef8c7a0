//! Getting the terminal into (and back out of) the state the game needs.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

fn undo_on_err<T>(res: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if res.is_err() {
        undo();
    }
    res
}

/// Holds the terminal in raw mode on the alternate screen, with mouse capture, until dropped.
pub struct Terminal(());

impl Terminal {
    fn init_term() -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(())
    }

    fn clean_term() -> io::Result<()> {
        execute!(
            io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Set the terminal up. If that fails partway, whatever did get set up is undone before returning the error.
    pub fn enter() -> io::Result<Self> {
        undo_on_err(Self::init_term(), || {
            let _ = Self::clean_term();
        })?;
        std::panic::set_hook(Box::new(|i| {
            let _ = Self::clean_term();
            println!("{}", i);
        }));
        Ok(Self(()))
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Ring the terminal bell.
    pub fn bell(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }

    /// Put a fully rendered frame on the screen in one write.
    pub fn present(&self, frame: &[u8]) -> io::Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(frame)?;
        stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = Self::clean_term();
        let _ = std::panic::take_hook();
    }
}
