//! A terminal frontend for the engine, rendered with crossterm.
//!
//! The four pads are drawn as colored blocks. Keys `r`/`g`/`b`/`y` (or `1`..`4`, in reading order) press pads, as
//! does clicking on them; any other key starts a game. `Esc` or `Ctrl-C` quits.

mod board;
mod terminal;

use std::{io, time::Duration};

use crossterm::{
    cursor::MoveTo,
    event::{self as ct, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use log::{debug, info};
use thiserror::Error;

use crate::{schedule::Instant, Color, ColorSource, Engine, Phase, Timer, Timings};

pub use self::{
    board::{layout, pad_at, Board, Rect, PAD_ORDER},
    terminal::Terminal,
};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid SIMON_TIMINGS: {0}")]
    Timings(#[from] serde_json::Error),
    #[error("invalid SIMON_SPEED {0:?}: expected a positive number")]
    Speed(String),
    #[error("{field} would last {ms}ms, over the limit of {}ms", Timings::MAX_MS)]
    TooLong { field: &'static str, ms: u64 },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Longest we'll wait for input before checking on the engine again, even if it has nothing scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Build [`Timings`] from an optional JSON object (missing fields default) and an optional speed multiplier.
///
/// A speed of 2 makes the game twice as fast.
pub fn timings_from(json: Option<&str>, speed: Option<&str>) -> Result<Timings> {
    let timings = match json {
        Some(json) => serde_json::from_str(json)?,
        None => Timings::default(),
    };
    let timings = match speed {
        None => timings,
        Some(raw) => match raw.trim().parse::<f32>() {
            Ok(speed) if speed.is_finite() && speed > 0.0 => timings.scaled(1.0 / speed),
            _ => return Err(Error::Speed(raw.into())),
        },
    };
    match timings.too_long() {
        Some((field, ms)) => Err(Error::TooLong { field, ms }),
        None => Ok(timings),
    }
}

/// [`timings_from`] the `SIMON_TIMINGS` and `SIMON_SPEED` environment variables.
pub fn timings_from_env() -> Result<Timings> {
    let json = std::env::var("SIMON_TIMINGS").ok();
    let speed = std::env::var("SIMON_SPEED").ok();
    timings_from(json.as_deref(), speed.as_deref())
}

/// What a terminal event means for the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// A pad's key was pressed. Starts a game if none is running.
    Key(Color),
    /// A pad was clicked.
    Click(Color),
    /// Any other key. Starts a game if none is running.
    Other,
    /// The screen needs to be redrawn from scratch.
    Redraw,
    Quit,
    Nothing,
}

fn color_for_key(ch: char) -> Option<Color> {
    match ch.to_ascii_lowercase() {
        'r' => Some(Color::Red),
        'g' => Some(Color::Green),
        'b' => Some(Color::Blue),
        'y' => Some(Color::Yellow),
        '1'..='4' => Some(PAD_ORDER[ch as usize - '1' as usize]),
        _ => None,
    }
}

/// Translate a crossterm event on a screen of the given size.
pub fn command_for(ev: &ct::Event, (cols, rows): (u16, u16)) -> Command {
    match ev {
        ct::Event::Key(key) if key.kind == KeyEventKind::Release => Command::Nothing,
        ct::Event::Key(key) => match key.code {
            KeyCode::Esc => Command::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char(ch) => color_for_key(ch).map_or(Command::Other, Command::Key),
            _ => Command::Other,
        },
        ct::Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => pad_at(cols, rows, mouse.column, mouse.row)
                .map_or(Command::Nothing, Command::Click),
            _ => Command::Nothing,
        },
        ct::Event::Resize(..) | ct::Event::FocusGained => Command::Redraw,
        _ => Command::Nothing,
    }
}

/// Feed a command to the engine. Returns whether the player asked to quit.
pub fn apply<S: ColorSource>(cmd: Command, engine: &mut Engine<S>, board: &mut Board) -> bool {
    let start = |engine: &mut Engine<S>, board: &mut Board| {
        if let Err(e) = engine.start(board) {
            debug!("start trigger ignored: {}", e);
        }
    };
    match cmd {
        Command::Quit => return true,
        Command::Key(_) | Command::Other if engine.phase() == Phase::Idle => start(engine, board),
        Command::Key(color) | Command::Click(color) => {
            let outcome = engine.submit(color, board);
            debug!("pressed {}: {:?}", color, outcome);
        }
        Command::Other | Command::Redraw | Command::Nothing => (),
    }
    false
}

fn ct_color(color: Color, lit: bool) -> CtColor {
    match (color, lit) {
        (Color::Red, true) => CtColor::Red,
        (Color::Red, false) => CtColor::DarkRed,
        (Color::Blue, true) => CtColor::Blue,
        (Color::Blue, false) => CtColor::DarkBlue,
        (Color::Green, true) => CtColor::Green,
        (Color::Green, false) => CtColor::DarkGreen,
        (Color::Yellow, true) => CtColor::Yellow,
        (Color::Yellow, false) => CtColor::DarkYellow,
    }
}

/// Render a whole frame into `out`, ready to be written to the terminal in one go.
pub fn render<S: ColorSource>(
    out: &mut Vec<u8>,
    engine: &Engine<S>,
    board: &Board,
    (cols, rows): (u16, u16),
) -> io::Result<()> {
    queue!(out, ResetColor, MoveTo(0, 0), Clear(ClearType::All))?;

    if board.error_shown() {
        let blank = " ".repeat(cols as usize);
        queue!(out, SetBackgroundColor(CtColor::DarkRed))?;
        for row in 0..rows {
            queue!(out, MoveTo(0, row), Print(&blank))?;
        }
        queue!(out, ResetColor)?;
    }

    for (color, rect) in layout(cols, rows) {
        let fill = " ".repeat(rect.w as usize);
        queue!(out, SetBackgroundColor(ct_color(color, board.is_lit(color))))?;
        for row in rect.y..rect.y + rect.h {
            queue!(out, MoveTo(rect.x, row), Print(&fill))?;
        }
    }
    queue!(out, ResetColor)?;

    let title = engine.message();
    let title_x = (cols as usize).saturating_sub(title.len()) / 2;
    queue!(
        out,
        MoveTo(title_x as u16, 0),
        SetForegroundColor(CtColor::White),
        Print(&title),
        ResetColor,
    )?;

    let mut status = format!("level {}  best {}", board.level(), engine.best());
    if let Some(cue) = board.last_cue() {
        status.push_str(&format!("  \u{266a} {}", cue));
    }
    queue!(out, MoveTo(1, 1), Print(&status))?;

    let help = "r/g/b/y or 1-4: press a pad   any key: start   esc: quit";
    queue!(out, MoveTo(1, rows.saturating_sub(1)), Print(help), ResetColor)?;
    Ok(())
}

/// Run the game in the terminal until the player quits, then hand the engine back.
pub fn run<S: ColorSource>(mut engine: Engine<S>) -> Result<Engine<S>> {
    let term = Terminal::enter()?;
    let mut board = Board::new();
    let mut frame = Vec::new();
    // render at most ~60fps
    let mut render_timer = Timer::new(Duration::from_secs_f32(1.0 / 60.0));
    let mut size = term.size()?;
    let mut tainted = true;

    info!("terminal frontend started at {}x{}", size.0, size.1);
    loop {
        let now = Instant::now();
        let mut wait = engine
            .next_due()
            .map(|due| due.checked_duration_since(now).unwrap_or_default())
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);
        if tainted {
            wait = wait.min(render_timer.remaining());
        }

        if ct::poll(wait)? {
            let ev = ct::read()?;
            let cmd = command_for(&ev, size);
            if cmd == Command::Redraw {
                size = term.size()?;
                tainted = true;
            }
            if apply(cmd, &mut engine, &mut board) {
                break;
            }
        }

        engine.update(&mut board);
        if board.take_bell() {
            term.bell()?;
        }
        tainted |= board.take_tainted();
        if tainted && render_timer.tick_ready() {
            frame.clear();
            render(&mut frame, &engine, &board, size)?;
            term.present(&frame)?;
            tainted = false;
        }
    }
    info!("quitting with best level {}", engine.best());
    Ok(engine)
}

#[cfg(test)]
mod test {
    use crossterm::event::{Event, KeyEvent, KeyEventState, MouseEvent};

    use super::*;
    use crate::{Outcome, ScriptedColors};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    const SIZE: (u16, u16) = (80, 24);

    #[test]
    fn keys_map_to_pads() {
        assert_eq!(command_for(&key(KeyCode::Char('r')), SIZE), Command::Key(Color::Red));
        assert_eq!(command_for(&key(KeyCode::Char('Y')), SIZE), Command::Key(Color::Yellow));
        assert_eq!(command_for(&key(KeyCode::Char('1')), SIZE), Command::Key(Color::Green));
        assert_eq!(command_for(&key(KeyCode::Char('4')), SIZE), Command::Key(Color::Blue));
        assert_eq!(command_for(&key(KeyCode::Char('x')), SIZE), Command::Other);
        assert_eq!(command_for(&key(KeyCode::Enter), SIZE), Command::Other);
        assert_eq!(command_for(&key(KeyCode::Esc), SIZE), Command::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(command_for(&ctrl_c, SIZE), Command::Quit);
    }

    #[test]
    fn releases_are_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind_and_state(
            KeyCode::Char('r'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        ));
        assert_eq!(command_for(&release, SIZE), Command::Nothing);
    }

    #[test]
    fn clicks_map_to_pads() {
        assert_eq!(command_for(&click(5, 5), SIZE), Command::Click(Color::Green));
        assert_eq!(command_for(&click(45, 15), SIZE), Command::Click(Color::Blue));
        assert_eq!(command_for(&click(39, 5), SIZE), Command::Nothing);
        assert_eq!(command_for(&Event::Resize(100, 30), SIZE), Command::Redraw);
    }

    #[test]
    fn any_key_starts_but_clicks_dont() {
        let mut engine = Engine::new(ScriptedColors::new([Color::Red]));
        let mut board = Board::new();

        assert!(!apply(Command::Click(Color::Red), &mut engine, &mut board));
        assert_eq!(engine.phase(), Phase::Idle);

        assert!(!apply(Command::Key(Color::Blue), &mut engine, &mut board));
        assert_eq!(engine.phase(), Phase::PlayingBack);
        assert_eq!(engine.level(), 1);
        assert!(board.is_lit(Color::Red));

        // another start trigger mid-game is harmless
        assert!(!apply(Command::Other, &mut engine, &mut board));
        assert_eq!(engine.level(), 1);

        assert!(apply(Command::Quit, &mut engine, &mut board));
    }

    #[test]
    fn keys_press_pads_mid_game() {
        let mut engine = Engine::new(ScriptedColors::new([Color::Green, Color::Red]));
        let mut board = Board::new();
        apply(Command::Other, &mut engine, &mut board);
        mock_instant::MockClock::advance(Duration::from_millis(300));
        engine.update(&mut board);
        assert!(engine.is_active());

        apply(Command::Key(Color::Green), &mut engine, &mut board);
        assert!(!engine.is_active());
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.submit(Color::Green, &mut board), Outcome::Ignored);
    }

    #[test]
    fn parses_timings() {
        let t = timings_from(Some(r#"{"round_pause": 400}"#), None).unwrap();
        assert_eq!(t.round_pause, 400);
        assert_eq!(t.flash, Timings::default().flash);

        let t = timings_from(None, Some("2")).unwrap();
        assert_eq!(t, Timings::default().scaled(0.5));

        assert!(matches!(timings_from(Some("{"), None), Err(Error::Timings(_))));
        assert!(matches!(timings_from(None, Some("0")), Err(Error::Speed(_))));
        assert!(matches!(timings_from(None, Some("fast")), Err(Error::Speed(_))));

        assert!(matches!(
            timings_from(None, Some("1e-20")),
            Err(Error::TooLong { field: "flash", .. })
        ));
        assert!(matches!(
            timings_from(Some(r#"{"flash": 18446744073709551615, "gap": 1}"#), None),
            Err(Error::TooLong { field: "flash", ms: u64::MAX })
        ));
        assert!(matches!(
            timings_from(Some(r#"{"round_pause": 3600000}"#), None),
            Ok(Timings { round_pause: 3_600_000, .. })
        ));
    }

    #[test]
    fn renders_title_and_status() {
        let mut engine = Engine::new(ScriptedColors::new([Color::Yellow]));
        let mut board = Board::new();
        engine.start(&mut board).unwrap();
        let mut out = Vec::new();
        render(&mut out, &engine, &board, SIZE).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Level 1"));
        assert!(text.contains("level 1  best 1"));
        assert!(text.contains("yellow"));
    }
}
