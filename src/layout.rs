//! Cell geometry, percentage spans, and text fitting

use std::ops::Range;

/// Rectangle bounds in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate (exclusive)
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate (exclusive)
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// True if the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a cell lies inside the rectangle
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `padding` cells on every side
    pub fn inner(&self, padding: u16) -> Self {
        let padding2 = padding.saturating_mul(2);
        Rect {
            x: self.x.saturating_add(padding),
            y: self.y.saturating_add(padding),
            width: self.width.saturating_sub(padding2),
            height: self.height.saturating_sub(padding2),
        }
    }

    /// Split off the top `rows` rows, returning (top, rest)
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, rows),
            Rect::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Split off the left `cols` columns, returning (left, rest)
    pub fn split_left(&self, cols: u16) -> (Rect, Rect) {
        let cols = cols.min(self.width);
        (
            Rect::new(self.x, self.y, cols, self.height),
            Rect::new(self.x + cols, self.y, self.width - cols, self.height),
        )
    }

    /// Single row at `offset` from the top, clamped to the rectangle
    pub fn row(&self, offset: u16) -> Rect {
        if offset >= self.height {
            return Rect::new(self.x, self.bottom(), self.width, 0);
        }
        Rect::new(self.x, self.y + offset, self.width, 1)
    }
}

/// A percentage interval `[start, end]` along a horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u8,
    pub end: u8,
}

impl Span {
    pub fn new(start: u8, end: u8) -> Self {
        let start = start.min(100);
        Span {
            start,
            end: end.clamp(start, 100),
        }
    }

    /// Covered percentage
    pub fn len(&self) -> u8 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Map onto `[0, total)` units. Boundaries round down, so adjacent spans
    /// map to adjacent ranges with no gap or overlap.
    pub fn to_range(&self, total: u32) -> Range<u32> {
        percent_of(self.start, total)..percent_of(self.end, total)
    }
}

/// `percent`% of `total`, rounded down
pub fn percent_of(percent: u8, total: u32) -> u32 {
    (total as u64 * percent.min(100) as u64 / 100) as u32
}

/// Display width of a string in cells
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Cut `text` to at most `width` cells, ending with an ellipsis when shortened
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    match width {
        0 => String::new(),
        1 => "…".to_string(),
        _ => {
            let mut out: String = text.chars().take(width - 1).collect();
            out.push('…');
            out
        }
    }
}

/// Greedy word wrap to `width` cells
///
/// Explicit newlines start a new line; words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > width {
                if line_width > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_width == 0 {
                word.len()
            } else {
                word.len() + 1
            };
            if line_width > 0 && line_width + needed > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line_width += word.len();
            line.extend(word);
        }

        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(10, 10, 20, 20);
        assert!(r.contains(15, 15));
        assert!(r.contains(10, 10));
        assert!(!r.contains(30, 30));
        assert!(!r.contains(5, 15));
    }

    #[test]
    fn test_rect_splits() {
        let r = Rect::new(0, 0, 80, 24);
        let (top, rest) = r.split_top(3);
        assert_eq!(top, Rect::new(0, 0, 80, 3));
        assert_eq!(rest, Rect::new(0, 3, 80, 21));

        let (left, rest) = r.split_left(20);
        assert_eq!(left, Rect::new(0, 0, 20, 24));
        assert_eq!(rest, Rect::new(20, 0, 60, 24));

        let (all, none) = r.split_top(100);
        assert_eq!(all, r);
        assert!(none.is_empty());
    }

    #[test]
    fn test_rect_row() {
        let r = Rect::new(2, 5, 10, 3);
        assert_eq!(r.row(1), Rect::new(2, 6, 10, 1));
        assert!(r.row(3).is_empty());
    }

    #[test]
    fn test_adjacent_spans_tile_exactly() {
        for split in 0..=100u8 {
            for total in [1u32, 7, 33, 80, 641] {
                let left = Span::new(0, split).to_range(total);
                let right = Span::new(split, 100).to_range(total);
                assert_eq!(left.start, 0);
                assert_eq!(left.end, right.start);
                assert_eq!(right.end, total);
            }
        }
    }

    #[test]
    fn test_span_normalizes_bounds() {
        let span = Span::new(70, 20);
        assert_eq!(span, Span::new(70, 70));
        assert!(span.is_empty());
        assert_eq!(Span::new(120, 200).len(), 0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello…");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_keeps_paragraphs_and_splits_long_words() {
        let lines = wrap_text("abcdefghij\n\nxy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "", "xy"]);
    }
}
