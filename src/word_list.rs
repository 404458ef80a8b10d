//! `word_list` — loads and preprocesses the candidate vocabulary.
//!
//! The input format is one word per line. Parsing normalizes every word to
//! lowercase, skips blank lines and words containing anything other than
//! ASCII letters, deduplicates, and sorts by length first, then
//! alphabetically. The solver indexes into words by byte offset, so the
//! ASCII-letters-only filter is what makes that indexing sound.
//!
//! Two entry points: [`WordList::parse_from_str`] works on in-memory text,
//! [`WordList::load_from_path`] is the file-reading convenience wrapper.

/// A processed, ready-to-use vocabulary.
///
/// `words` holds lowercase ASCII words, deduplicated and sorted by
/// (length, alphabetical).
#[derive(Debug, Clone)]
pub struct WordList {
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let word = raw_line.trim().to_lowercase();
                if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
                    None
                } else {
                    Some(word)
                }
            })
            .collect();

        // dedup() only removes adjacent duplicates, so sort alphabetically
        // first, then re-sort by (length, alphabetical).
        words.sort();
        words.dedup();
        words.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        WordList { words }
    }

    /// Read a word list from a file path and parse it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file at `path` cannot be read.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;
        Ok(Self::parse_from_str(&data))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let list = WordList::parse_from_str("cat\ndog\nbird");
        assert_eq!(list.words, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_parse_normalizes_to_lowercase() {
        let list = WordList::parse_from_str("CAT\nDog\nbIRD");
        assert_eq!(list.words, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_parse_deduplicates() {
        let list = WordList::parse_from_str("cat\nCAT\ncat\ndog");
        assert_eq!(list.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_sorts_by_length_then_alpha() {
        let list = WordList::parse_from_str("zebra\ncat\nab\napple\ndog");
        assert_eq!(list.words, vec!["ab", "cat", "dog", "apple", "zebra"]);
    }

    #[test]
    fn test_parse_skips_blank_and_non_alphabetic_lines() {
        let list = WordList::parse_from_str("cat\n\n  \nup2date\nhy-phen\ndog");
        assert_eq!(list.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let list = WordList::parse_from_str("  cat  \n\tdog\n");
        assert_eq!(list.words, vec!["cat", "dog"]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(WordList::parse_from_str("").is_empty());
    }
}
