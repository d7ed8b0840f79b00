use std::cell::RefCell;
use std::io::{Result as IoResult, Write};
use std::rc::Rc;

/// Foreground colours the shell knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Cyan,
    White,
}

/// Output surface used by every command.
///
/// Plain text goes through the [`Write`] half. Screen clearing and colour are
/// display capabilities on top of it, so commands never emit escape codes
/// themselves and tests can observe the requests.
pub trait Terminal: Write {
    /// Wipe the screen and home the cursor.
    fn clear_screen(&mut self) -> IoResult<()>;

    /// Render following text in `color` until [`Terminal::reset_color`].
    fn set_color(&mut self, color: Color) -> IoResult<()>;

    /// Return to the default foreground colour.
    fn reset_color(&mut self) -> IoResult<()>;
}

/// ANSI/VT100 terminal on top of any writer, usually stdout.
pub struct AnsiTerminal<W: Write> {
    out: W,
}

impl<W: Write> AnsiTerminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Write for AnsiTerminal<W> {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.out.write(data)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.out.flush()
    }
}

impl<W: Write> Terminal for AnsiTerminal<W> {
    fn clear_screen(&mut self) -> IoResult<()> {
        self.out.write_all(b"\x1b[2J\x1b[H")?;
        self.out.flush()
    }

    fn set_color(&mut self, color: Color) -> IoResult<()> {
        let code: &[u8] = match color {
            Color::Cyan => b"\x1b[36m",
            Color::White => b"\x1b[37m",
        };
        self.out.write_all(code)
    }

    fn reset_color(&mut self) -> IoResult<()> {
        self.out.write_all(b"\x1b[0m")
    }
}

/// Memory-backed terminal for capturing command output.
///
/// Text is collected into a shared buffer; display requests are only counted
/// or recorded, never rendered.
#[derive(Default)]
pub struct MemTerminal {
    buf: Rc<RefCell<Vec<u8>>>,
    clears: usize,
    colors: Vec<Color>,
}

impl MemTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: create terminal and return (terminal, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let term = MemTerminal::new();
        let rc = term.buf.clone();
        (term, rc)
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    /// Return the captured text and empty the buffer.
    pub fn take(&mut self) -> String {
        let bytes = std::mem::take(&mut *self.buf.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// How many times a clear screen was requested.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Colours requested through [`Terminal::set_color`], in order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Write for MemTerminal {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

impl Terminal for MemTerminal {
    fn clear_screen(&mut self) -> IoResult<()> {
        self.clears += 1;
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> IoResult<()> {
        self.colors.push(color);
        Ok(())
    }

    fn reset_color(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_terminal_emits_escape_codes() {
        let mut term = AnsiTerminal::new(Vec::new());
        term.set_color(Color::Cyan).unwrap();
        write!(term, "hi").unwrap();
        term.reset_color().unwrap();
        term.clear_screen().unwrap();

        let s = String::from_utf8(term.out).unwrap();
        assert_eq!(s, "\x1b[36mhi\x1b[0m\x1b[2J\x1b[H");
    }

    #[test]
    fn test_mem_terminal_records_requests() {
        let (mut term, handle) = MemTerminal::with_handle();
        writeln!(term, "one").unwrap();
        term.clear_screen().unwrap();
        term.set_color(Color::White).unwrap();

        assert_eq!(term.clears(), 1);
        assert_eq!(term.colors(), &[Color::White]);
        assert_eq!(handle.borrow().as_slice(), b"one\n");
        assert_eq!(term.take(), "one\n");
        assert_eq!(term.contents(), "");
    }
}
