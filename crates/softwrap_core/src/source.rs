//! Read-only access to the document's source lines.

use std::borrow::Cow;

/// Ordered, zero-indexed sequence of source lines the wrap engine reads from.
///
/// Implementations return lines without their trailing line ending. The engine
/// never mutates a source; edits happen on the owning collaborator, which then
/// tells the [`WrapCache`](crate::WrapCache) what to invalidate.
pub trait LineSource {
    /// Number of lines in the source.
    fn line_count(&self) -> usize;

    /// Text of line `index`, or `None` when out of range.
    fn line(&self, index: usize) -> Option<Cow<'_, str>>;
}

impl<T: AsRef<str>> LineSource for [T] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.get(index).map(|line| Cow::Borrowed(line.as_ref()))
    }
}

impl<T: AsRef<str>> LineSource for Vec<T> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        self.as_slice().line(index)
    }
}

/// Strip one trailing `\n`, `\r\n` or `\r`.
pub(crate) fn strip_line_ending(line: &str) -> &str {
    if let Some(rest) = line.strip_suffix('\n') {
        rest.strip_suffix('\r').unwrap_or(rest)
    } else {
        line.strip_suffix('\r').unwrap_or(line)
    }
}

/// Lines split on `\n` only. `ropey` is built without its `cr_lines` and
/// `unicode_lines` features, so a lone `\r` or U+2028 stays inside the line,
/// the same as in [`LineBuffer`](crate::LineBuffer).
#[cfg(feature = "rope")]
impl LineSource for ropey::Rope {
    fn line_count(&self) -> usize {
        self.len_lines()
    }

    fn line(&self, index: usize) -> Option<Cow<'_, str>> {
        if index >= self.len_lines() {
            return None;
        }
        let slice = self.line(index);
        match slice.as_str() {
            Some(text) => Some(Cow::Borrowed(strip_line_ending(text))),
            None => {
                let owned = slice.to_string();
                Some(Cow::Owned(strip_line_ending(&owned).to_string()))
            }
        }
    }
}
