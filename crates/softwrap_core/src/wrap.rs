//! Greedy word wrapping for a single source line.
//!
//! Lengths are counted in `char`s so multi-byte text is never split inside a
//! character.

use std::mem;

/// Number of `char`s in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `column`-th char, clamped to `text.len()`.
pub(crate) fn char_to_byte(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

/// Wrap `line` into display rows no wider than `width` chars.
///
/// Words are packed greedily and joined by a single space, so whitespace runs
/// between words collapse. A word wider than `width` is hard-broken into
/// `width`-sized chunks after flushing the row being built; its short tail
/// starts the next row. A whitespace-only line is returned verbatim regardless
/// of `width`. A `width` of zero is treated as one.
///
/// # Returns
/// At least one segment. An empty line yields a single empty segment.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if line.is_empty() {
        return vec![String::new()];
    }
    if char_len(line) <= width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut saw_word = false;

    for word in line.split_whitespace() {
        saw_word = true;
        let mut word = word;
        let mut word_len = char_len(word);

        if word_len > width {
            if !current.is_empty() {
                rows.push(mem::take(&mut current));
            }
            while word_len > width {
                let split = char_to_byte(word, width);
                rows.push(word[..split].to_string());
                word = &word[split..];
                word_len -= width;
            }
            current = word.to_string();
            current_len = word_len;
            continue;
        }

        let joined_len = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if joined_len <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = joined_len;
        } else {
            if !current.is_empty() {
                rows.push(mem::take(&mut current));
            }
            current = word.to_string();
            current_len = word_len;
        }
    }

    if !saw_word {
        return vec![line.to_string()];
    }
    if !current.is_empty() {
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn wraps_reference_lines_at_width_five() {
        struct Case {
            line: &'static str,
            expected: &'static [&'static str],
        }

        let cases = [
            Case {
                line: "hello world",
                expected: &["hello", "world"],
            },
            Case {
                line: "a",
                expected: &["a"],
            },
            Case {
                line: "supercalifragilisticexpialidocious",
                expected: &["super", "calif", "ragil", "istic", "expia", "lidoc", "ious"],
            },
            Case {
                line: "ab cdefghijkl",
                expected: &["ab", "cdefg", "hijkl"],
            },
            Case {
                line: "abcdefg hi",
                expected: &["abcde", "fg hi"],
            },
            Case {
                line: "aa    bb cc",
                expected: &["aa bb", "cc"],
            },
        ];

        for case in cases {
            assert_eq!(wrap_line(case.line, 5), case.expected, "line: {}", case.line);
        }
    }

    #[test]
    fn empty_line_yields_single_empty_segment() {
        assert_eq!(wrap_line("", 20), vec![String::new()]);
    }

    #[test]
    fn short_line_is_returned_verbatim_including_spacing() {
        assert_eq!(wrap_line("  two  spaces", 20), vec!["  two  spaces"]);
    }

    #[test]
    fn whitespace_only_line_is_exempt_from_width() {
        let line = " ".repeat(50);
        assert_eq!(wrap_line(&line, 20), vec![line.clone()]);
        assert_eq!(wrap_line("\t \t ", 2), vec!["\t \t "]);
    }

    #[test]
    fn zero_width_behaves_like_width_one() {
        assert_eq!(wrap_line("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn multibyte_words_break_on_char_boundaries() {
        assert_eq!(wrap_line("ééééé ééééé", 5), vec!["ééééé", "ééééé"]);
        assert_eq!(wrap_line("日本語日本語", 4), vec!["日本語日", "本語"]);
    }

    #[test]
    fn random_lines_are_non_empty_and_respect_width() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let alphabet: Vec<char> = "abcdefghij  é".chars().collect();
        for _ in 0..500 {
            let len = rng.gen_range(0..120);
            let line: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            let width = rng.gen_range(1..40);
            let rows = wrap_line(&line, width);
            assert!(!rows.is_empty(), "line: {:?}", line);
            if line.trim().is_empty() {
                continue;
            }
            for row in &rows {
                assert!(
                    char_len(row) <= width,
                    "row {:?} wider than {} for line {:?}",
                    row,
                    width,
                    line
                );
            }
        }
    }

    #[test]
    fn char_to_byte_clamps_past_end() {
        assert_eq!(char_to_byte("aé", 1), 1);
        assert_eq!(char_to_byte("aé", 2), 3);
        assert_eq!(char_to_byte("aé", 9), 3);
    }
}
