//! Where `print` writes and where `input` reads.
//!
//! Hosts pick a variant when building the interpreter: the process streams
//! for a REPL, or an in-memory buffer and a scripted line queue for tests and
//! embedding. Handlers are shared behind `Arc` so the host keeps a handle to
//! read captured output back.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination of printed lines.
pub enum PrintHandlerImpl {
    Stdout,
    /// Accumulates every line, newline included.
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandlerImpl {
    /// Emit `line` followed by a newline.
    pub fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far; empty unless this is a buffer.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Drop captured output.
    pub fn reset(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::default()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

/// Source of lines for the `input` builtin.
pub enum InputHandlerImpl {
    Stdin,
    /// Pre-recorded lines, handed out front to back.
    Scripted(Mutex<VecDeque<String>>),
}

impl InputHandlerImpl {
    /// Next line without its terminator, or `None` at end of input.
    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdin => {
                let mut line = String::new();
                match std::io::stdin().lock().read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => {
                        let kept = line.trim_end_matches(['\n', '\r']).len();
                        line.truncate(kept);
                        Some(line)
                    }
                }
            }
            Self::Scripted(lines) => lines.lock().pop_front(),
        }
    }
}

pub type SharedInputHandler = Arc<InputHandlerImpl>;

pub fn stdin_handler() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Stdin)
}

pub fn scripted_input<I, S>(lines: I) -> SharedInputHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let queue = lines.into_iter().map(Into::into).collect();
    Arc::new(InputHandlerImpl::Scripted(Mutex::new(queue)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_keeps_lines_in_order() {
        let out = buffer_handler();
        out.write_line("hello");
        out.write_line("world");
        assert_eq!(out.output(), "hello\nworld\n");
        out.reset();
        assert_eq!(out.output(), "");
    }

    #[test]
    fn non_buffers_capture_nothing() {
        let silent = silent_handler();
        silent.write_line("dropped");
        assert_eq!(silent.output(), "");
        assert_eq!(stdout_handler().output(), "");
    }

    #[test]
    fn scripted_lines_run_out() {
        let input = scripted_input(["first", "second"]);
        assert_eq!(input.read_line().as_deref(), Some("first"));
        assert_eq!(input.read_line().as_deref(), Some("second"));
        assert_eq!(input.read_line(), None);
    }
}
