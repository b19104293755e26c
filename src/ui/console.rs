//! Output sinks for rendered lines

use parking_lot::Mutex;
use std::io::Write;

/// Destination for rendered output
pub trait Console: Send + Sync {
    /// Writes a block of lines as one unit
    fn print(&self, lines: &[String]);
}

/// Writes to standard output
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn print(&self, lines: &[String]) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for line in lines {
            // A closed stdout is not worth failing a cycle over.
            let _ = writeln!(out, "{}", line);
        }
        let _ = out.flush();
    }
}

/// Collects output in memory
#[derive(Debug, Default)]
pub struct BufferConsole {
    lines: Mutex<Vec<String>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything printed so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Whether any printed line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl Console for BufferConsole {
    fn print(&self, lines: &[String]) {
        self.lines.lock().extend_from_slice(lines);
    }
}
