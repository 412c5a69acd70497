//! Console handles
//!
//! The interpreter never touches process stdin/stdout directly; it reads and
//! writes through a [`Console`] supplied by the caller. Tests use in-memory
//! buffers, the CLI uses the locked standard streams.

use std::io::{self, BufRead, Write};

/// Input and output streams for one interpreter
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// Console over the process standard streams
pub type StdConsole = Console<io::StdinLock<'static>, io::StdoutLock<'static>>;

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input byte, `None` at end of input
    ///
    /// Pending output is flushed first so prompts are visible while the
    /// program waits. Only that flush can fail; read errors are reported as
    /// end of input.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.output.flush()?;
        let byte = match self.input.fill_buf() {
            Ok(buffer) => match buffer.first() {
                Some(&byte) => byte,
                None => return Ok(None),
            },
            Err(_) => return Ok(None),
        };
        self.input.consume(1);
        Ok(Some(byte))
    }

    /// Next input line without its line terminator, `None` at end of input
    ///
    /// Flushes pending output first, like [`read_byte`](Self::read_byte).
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut raw = Vec::new();
        match self.input.read_until(b'\n', &mut raw) {
            Ok(0) | Err(_) => Ok(None),
            Ok(_) => {
                if raw.last() == Some(&b'\n') {
                    raw.pop();
                    if raw.last() == Some(&b'\r') {
                        raw.pop();
                    }
                }
                Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
            }
        }
    }

    pub fn write_char(&mut self, ch: char) -> io::Result<()> {
        let mut buffer = [0u8; 4];
        self.output.write_all(ch.encode_utf8(&mut buffer).as_bytes())
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.write_all(b"\n")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    /// Take the streams back
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl StdConsole {
    /// Console bound to the process stdin and stdout
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout().lock())
    }
}

/// In-memory console for tests and embedding: fixed input, captured output
pub type BufferConsole = Console<io::Cursor<Vec<u8>>, Vec<u8>>;

impl BufferConsole {
    pub fn buffered(input: impl Into<Vec<u8>>) -> Self {
        Console::new(io::Cursor::new(input.into()), Vec::new())
    }

    /// Captured output as text
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}
