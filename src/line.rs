//! Styled lines and chunks
//!
//! A line is an ordered sequence of styled text fragments ("chunks") as
//! produced by the ANSI decoder. The buffer and the line filter treat
//! style opaquely; filtering only ever reads the concatenated plain text.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Flags for chunk text decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Decorations {
    bits: u8,
}

impl Decorations {
    pub const NONE: u8 = 0;
    pub const BOLD: u8 = 1 << 0;
    pub const DIM: u8 = 1 << 1;
    pub const ITALIC: u8 = 1 << 2;
    pub const UNDERLINE: u8 = 1 << 3;
    pub const BLINK: u8 = 1 << 4;
    pub const INVERSE: u8 = 1 << 5;
    pub const HIDDEN: u8 = 1 << 6;
    pub const STRIKETHROUGH: u8 = 1 << 7;

    pub const fn empty() -> Self {
        Decorations { bits: Self::NONE }
    }

    pub const fn new(bits: u8) -> Self {
        Decorations { bits }
    }

    pub fn contains(&self, flag: u8) -> bool {
        self.bits & flag != 0
    }

    pub fn insert(&mut self, flag: u8) {
        self.bits |= flag;
    }

    pub fn remove(&mut self, flag: u8) {
        self.bits &= !flag;
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// A styled text fragment within one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub decorations: Decorations,
}

impl Chunk {
    /// Create an unstyled chunk
    pub fn plain(text: impl Into<String>) -> Self {
        Chunk {
            text: text.into(),
            fg: None,
            bg: None,
            decorations: Decorations::empty(),
        }
    }

    /// Create a chunk with a foreground color
    pub fn colored(text: impl Into<String>, fg: Color) -> Self {
        Chunk {
            fg: Some(fg),
            ..Chunk::plain(text)
        }
    }
}

/// One display line: an ordered sequence of styled chunks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    chunks: Vec<Chunk>,
}

impl Line {
    /// Create an empty line (no chunks yet)
    pub fn new() -> Self {
        Line { chunks: Vec::new() }
    }

    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Line { chunks }
    }

    /// Convenience constructor for a single unstyled chunk
    pub fn from_text(text: impl Into<String>) -> Self {
        Line {
            chunks: vec![Chunk::plain(text)],
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn push_chunk(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Concatenated plain text of all chunks, style ignored
    pub fn text(&self) -> String {
        let mut s = String::new();
        for chunk in &self.chunks {
            s.push_str(&chunk.text);
        }
        s
    }

    /// True if the line carries no readable characters: box-drawing rules,
    /// separators made of dashes or asterisks, and the like.
    pub fn is_decorative(&self) -> bool {
        !self.text().chars().any(char::is_alphanumeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn test_text_concatenates_chunks() {
        let line = Line::from_chunks(vec![
            Chunk::plain("You are standing "),
            Chunk::colored("in a dark forest", Color::Named(NamedColor::Green)),
            Chunk::plain("."),
        ]);
        assert_eq!(line.text(), "You are standing in a dark forest.");
    }

    #[test]
    fn test_empty_line() {
        let line = Line::new();
        assert!(line.is_empty());
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_push_chunk() {
        let mut line = Line::new();
        line.push_chunk(Chunk::plain("hp: "));
        line.push_chunk(Chunk::colored("100", Color::Indexed(34)));
        assert_eq!(line.chunks().len(), 2);
        assert_eq!(line.text(), "hp: 100");
    }

    #[test]
    fn test_is_decorative() {
        assert!(Line::from_text("----====----").is_decorative());
        assert!(Line::from_text("  * * * ").is_decorative());
        assert!(Line::from_text("").is_decorative());
        assert!(!Line::from_text("--- Room 3 ---").is_decorative());
        assert!(!Line::from_text("hello").is_decorative());
    }

    #[test]
    fn test_decorations_flags() {
        let mut deco = Decorations::empty();
        assert!(deco.is_empty());

        deco.insert(Decorations::BOLD);
        deco.insert(Decorations::UNDERLINE);
        assert!(deco.contains(Decorations::BOLD));
        assert!(deco.contains(Decorations::UNDERLINE));
        assert!(!deco.contains(Decorations::BLINK));

        deco.remove(Decorations::BOLD);
        assert!(!deco.contains(Decorations::BOLD));
    }
}
