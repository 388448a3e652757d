use crate::{SourcePosition, Span};

/// A cursor over the source buffer.
///
/// The cursor is `Copy`, so a recognizer can advance a copy and only
/// write it back once it has decided that it matched.
#[derive(Clone, Copy, Debug)]
pub struct Input<'input> {
    source: &'input str,
    offset: usize,
}

impl<'input> Input<'input> {
    pub fn new(source: &'input str) -> Self {
        Self { source, offset: 0 }
    }

    pub fn source(&self) -> &'input str {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the cursor back (or forward) to a previously observed offset.
    pub fn reset(&mut self, offset: usize) {
        debug_assert!(self.source.is_char_boundary(offset));
        self.offset = offset;
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    pub fn rest(&self) -> &'input str {
        &self.source[self.offset..]
    }

    pub fn bytes(&self) -> &'input [u8] {
        &self.source.as_bytes()[self.offset..]
    }

    pub fn get(&self, relative_index: usize) -> Option<u8> {
        self.source
            .as_bytes()
            .get(self.offset + relative_index)
            .copied()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn matches(&self, str: &str) -> bool {
        self.rest().starts_with(str)
    }

    /// Consume `str` if the input continues with it.
    pub fn eat(&mut self, str: &str) -> bool {
        if self.matches(str) {
            self.offset += str.len();
            true
        } else {
            false
        }
    }

    /// Consume `count` bytes. `count` has to end on a character boundary.
    pub fn consume(&mut self, count: usize) -> &'input str {
        let end = (self.offset + count).min(self.source.len());
        let part = &self.source[self.offset..end];
        self.offset = end;
        part
    }

    pub fn consume_char(&mut self) -> Option<char> {
        let char = self.peek_char()?;
        self.offset += char.len_utf8();
        Some(char)
    }

    pub fn consume_rest(&mut self) -> &'input str {
        let part = self.rest();
        self.offset = self.source.len();
        part
    }

    /// Consume the longest run of bytes accepted by `class`.
    /// `class` may only accept ASCII bytes.
    pub fn consume_while(&mut self, class: impl Fn(u8) -> bool) -> &'input str {
        let count = self.bytes().iter().take_while(|c| class(**c)).count();
        self.consume(count)
    }

    pub fn slice(&self, span: Span) -> &'input str {
        &self.source[span.start..span.end]
    }

    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.offset)
    }

    /// Line and column (both starting at 1) of a byte offset.
    pub fn position_of(&self, offset: usize) -> SourcePosition {
        let offset = offset.min(self.source.len());
        let before = &self.source.as_bytes()[..offset];
        let line = memchr::memchr_iter(b'\n', before).count() as u32 + 1;
        let line_start = memchr::memrchr(b'\n', before).map(|idx| idx + 1).unwrap_or(0);
        // count characters, not bytes: skip utf-8 continuation bytes
        let column = before[line_start..]
            .iter()
            .filter(|c| (**c & 0xC0) != 0x80)
            .count() as u32
            + 1;
        SourcePosition { line, column }
    }
}
