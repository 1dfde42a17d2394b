//! Draft buffer for the next message.

/// Input text that has not been submitted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the whole draft, e.g. with imported file content.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Add a voice transcript after a single space. Blank transcripts are
    /// ignored.
    pub fn append_transcript(&mut self, transcript: &str) {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(transcript);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Take the text out, leaving the draft empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_joins_with_space() {
        let mut draft = Draft::new();
        draft.replace("foo");
        draft.append_transcript("bar");
        assert_eq!(draft.text(), "foo bar");
    }

    #[test]
    fn transcript_on_empty_draft_has_no_leading_space() {
        let mut draft = Draft::new();
        draft.append_transcript("bar");
        assert_eq!(draft.text(), "bar");
    }

    #[test]
    fn blank_transcript_is_ignored() {
        let mut draft = Draft::new();
        draft.replace("foo");
        draft.append_transcript("  ");
        assert_eq!(draft.text(), "foo");
    }

    #[test]
    fn take_empties_the_draft() {
        let mut draft = Draft::new();
        draft.replace("hello");
        assert_eq!(draft.take(), "hello");
        assert!(draft.is_blank());
        assert_eq!(draft.text(), "");
    }

    #[test]
    fn clear_and_blank() {
        let mut draft = Draft::new();
        draft.replace("   ");
        assert!(draft.is_blank());
        draft.replace("x");
        assert!(!draft.is_blank());
        draft.clear();
        assert!(draft.is_blank());
    }
}
