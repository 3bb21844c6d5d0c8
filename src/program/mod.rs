//! Command log for the turtle interpreter
//!
//! Keeps every raw command line in the order it was entered. Replaying the
//! log against a freshly reset turtle rebuilds the drawing.

/// Ordered record of raw command strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLog {
    lines: Vec<String>,
}

impl CommandLog {
    /// Create an empty command log
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a raw command line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Forget every recorded line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for CommandLog {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut log = CommandLog::new();
        log.push("move 10");
        log.push("right 90");
        log.push("frobnicate");
        assert_eq!(log.len(), 3);
        assert_eq!(log.lines(), ["move 10", "right 90", "frobnicate"]);
        assert_eq!(log.iter().last(), Some("frobnicate"));
    }

    #[test]
    fn test_clear() {
        let mut log = CommandLog::from(vec!["penup".to_string()]);
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }
}
