/// The built-in rotation used when no custom passage list is configured.
pub const DEFAULT_PASSAGES: [&str; 7] = [
    "The quick brown fox jumps over the lazy dog.",
    "Programming is learning to tame chaos.",
    "A journey of a thousand miles begins with a single step.",
    "Do not go where the path may lead, go instead where there is no path and leave a trail.",
    "Innovation distinguishes between a leader and a follower.",
    "The only way to do great work is to love what you do.",
    "Life is 10% what happens to you and 90% how you react to it.",
];

pub fn default_passages() -> Vec<String> {
    DEFAULT_PASSAGES.iter().map(|s| s.to_string()).collect()
}

/// An immutable target text the user is asked to transcribe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    text: String,
}

impl Passage {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    /// Length in code points, which is the unit the diff works in.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Deterministic round-robin over a fixed, non-empty passage list.
///
/// The cursor advances before each read and survives restarts, so two
/// consecutive sessions never see the same passage unless the list has a
/// single entry.
#[derive(Debug)]
pub struct PassageProvider {
    passages: Vec<Passage>,
    cursor: usize,
}

impl PassageProvider {
    /// Returns `None` when the list is empty or contains an empty entry;
    /// zero-length passages would make completion fire on the first event.
    pub fn new(texts: Vec<String>) -> Option<Self> {
        if texts.is_empty() || texts.iter().any(|t| t.is_empty()) {
            return None;
        }
        Some(Self {
            passages: texts.into_iter().map(|text| Passage { text }).collect(),
            cursor: 0,
        })
    }

    pub fn next(&mut self) -> Passage {
        self.cursor = (self.cursor + 1) % self.passages.len();
        self.passages[self.cursor].clone()
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

impl Default for PassageProvider {
    fn default() -> Self {
        Self::new(default_passages()).unwrap()
    }
}
