//! Colored console output and interactive input.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::terminal;

pub struct ConsoleHelper;

impl ConsoleHelper {
    pub fn info(message: impl AsRef<str>) {
        print_tagged(None, Color::Cyan, message.as_ref());
    }

    pub fn warning(message: impl AsRef<str>) {
        print_tagged(Some("Warning"), Color::Yellow, message.as_ref());
    }

    pub fn error(message: impl AsRef<str>) {
        print_tagged(Some("Error"), Color::Red, message.as_ref());
    }

    /// Prompts and reads one line. Returns `None` on end of input. With
    /// `password` set and an interactive terminal, input is read in raw
    /// mode and echoed as asterisks.
    pub fn read_user_input(prompt: &str, password: bool) -> Result<Option<String>> {
        let mut stdout = io::stdout();
        if !prompt.is_empty() {
            write!(stdout, "{prompt}> ")?;
            stdout.flush()?;
        }

        if password && io::stdin().is_terminal() {
            let line = read_password_raw(&mut stdout)?;
            writeln!(stdout)?;
            return Ok(Some(line));
        }

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        while line.ends_with(['\n', '\r']) {
            line.pop();
        }
        Ok(Some(line))
    }
}

fn print_tagged(tag: Option<&str>, color: Color, message: &str) {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, SetForegroundColor(color));
    match tag {
        Some(tag) => {
            let _ = write!(stdout, "{tag}: ");
            let _ = crossterm::execute!(stdout, ResetColor);
            let _ = writeln!(stdout, "{message}");
        }
        None => {
            let _ = writeln!(stdout, "{message}");
            let _ = crossterm::execute!(stdout, ResetColor);
        }
    }
    let _ = stdout.flush();
}

fn read_password_raw(stdout: &mut io::Stdout) -> Result<String> {
    let _guard = RawMode::enable()?;
    let mut buffer = String::new();
    loop {
        let Event::Key(key) = event::read().context("failed to read console event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => break,
            KeyCode::Backspace => {
                if buffer.pop().is_some() {
                    write!(stdout, "\u{8} \u{8}")?;
                    stdout.flush()?;
                }
            }
            KeyCode::Char(ch) if ch == ' ' || ch.is_ascii_graphic() => {
                buffer.push(ch);
                write!(stdout, "*")?;
                stdout.flush()?;
            }
            _ => {}
        }
    }
    Ok(buffer)
}

struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
