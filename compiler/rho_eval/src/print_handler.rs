//! Where `print` and `cat` output goes.
//!
//! The console writes to stdout, tests capture into a buffer, and
//! `rho run --quiet` drops everything.

use std::io::Write;

use parking_lot::Mutex;

/// The configured output sink.
pub enum PrintHandler {
    Stdout,
    /// Keeps everything written, for inspection with [`PrintHandler::output`].
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Write `text` as is.
    pub fn print(&self, text: &str) {
        match self {
            Self::Stdout => {
                // A closed pipe is not an evaluation error.
                let _ = std::io::stdout().lock().write_all(text.as_bytes());
            }
            Self::Buffer(buffer) => buffer.lock().push_str(text),
            Self::Silent => {}
        }
    }

    /// Write `text` and a newline.
    pub fn println(&self, text: &str) {
        match self {
            Self::Stdout => {
                let _ = writeln!(std::io::stdout().lock(), "{text}");
            }
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(text);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far. Empty unless this is a buffer.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Drain the captured output.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => std::mem::take(&mut *buffer.lock()),
            Self::Stdout | Self::Silent => String::new(),
        }
    }
}

impl std::fmt::Debug for PrintHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Stdout => "PrintHandler::Stdout",
            Self::Buffer(_) => "PrintHandler::Buffer",
            Self::Silent => "PrintHandler::Silent",
        })
    }
}

#[expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of SharedPrintHandler"
)]
pub type SharedPrintHandler = std::sync::Arc<PrintHandler>;

#[expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of SharedPrintHandler"
)]
fn shared(handler: PrintHandler) -> SharedPrintHandler {
    std::sync::Arc::new(handler)
}

pub fn stdout_handler() -> SharedPrintHandler {
    shared(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    shared(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    shared(PrintHandler::Silent)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn buffer_keeps_writes_in_order() {
        let handler = buffer_handler();
        handler.print("[1]");
        handler.print(" ");
        handler.println("42");
        assert_eq!(handler.output(), "[1] 42\n");
    }

    #[test]
    fn take_output_drains() {
        let handler = buffer_handler();
        handler.println("x");
        assert_eq!(handler.take_output(), "x\n");
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn only_buffers_capture() {
        let silent = silent_handler();
        silent.println("dropped");
        assert_eq!(silent.output(), "");
        assert_eq!(stdout_handler().take_output(), "");
    }
}
