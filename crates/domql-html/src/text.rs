use crate::tokenizer::{Token, tokenize, unescape};

/// Separator placed between extracted segments.
const SEGMENT_SEPARATOR: &str = "\n";

/// Extractor state.
///
/// Entered by start tags only. A closing `</script>` does not leave
/// [`ScanState::InsideScript`]; the next non-script start tag does.
/// Self-closing tags such as `<br/>` leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Text tokens are collected.
    #[default]
    Scanning,
    /// The last start tag was `script`; text tokens are dropped.
    InsideScript,
}

/// Collects the visible text segments of a token stream.
///
/// Each text token becomes one segment: unescaped, trimmed, and kept only
/// if something remains. The tokenizer already resolves references in
/// ordinary text, so those are unescaped twice; raw text such as a `style`
/// body is unescaped once.
#[derive(Debug, Default)]
pub struct TextExtractor {
    state: ScanState,
    segments: Vec<String>,
}

impl TextExtractor {
    /// Create an extractor in the [`ScanState::Scanning`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Segments collected so far, in document order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Consume one token.
    pub fn feed(&mut self, token: &Token) {
        match token {
            Token::StartTag {
                name,
                self_closing: false,
            } => {
                self.state = if name == "script" {
                    ScanState::InsideScript
                } else {
                    ScanState::Scanning
                };
            }
            Token::Text(text) if self.state == ScanState::Scanning => {
                let text = unescape(text);
                let segment = text.trim();
                if !segment.is_empty() {
                    self.segments.push(segment.to_string());
                }
            }
            Token::StartTag {
                self_closing: true, ..
            }
            | Token::Text(_)
            | Token::EndTag { .. }
            | Token::Other => {}
        }
    }

    /// Join the collected segments with newlines.
    #[must_use]
    pub fn finish(self) -> String {
        self.segments.join(SEGMENT_SEPARATOR)
    }
}

/// Extract the human-visible text of an HTML fragment.
///
/// Text tokens are trimmed, entity-unescaped and joined by `"\n"` in
/// document order. Text following a `script` start tag is skipped until
/// another start tag is seen.
///
/// Never fails: malformed markup yields whatever text the tokenizer
/// recovers.
///
/// # Example
///
/// ```
/// use domql_html::extract_text;
///
/// let text = extract_text("<p>Hello</p><script>x()</script><p>World</p>");
/// assert_eq!(text, "Hello\nWorld");
/// ```
#[must_use]
pub fn extract_text(fragment: &str) -> String {
    let mut extractor = TextExtractor::new();
    for token in tokenize(fragment) {
        extractor.feed(&token);
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str) -> Token {
        Token::StartTag {
            name: name.to_string(),
            self_closing: false,
        }
    }

    #[test]
    fn test_state_transitions() {
        let mut extractor = TextExtractor::new();
        assert_eq!(extractor.state(), ScanState::Scanning);

        extractor.feed(&start("script"));
        assert_eq!(extractor.state(), ScanState::InsideScript);

        // Closing tags never change state.
        extractor.feed(&Token::EndTag {
            name: "script".to_string(),
        });
        assert_eq!(extractor.state(), ScanState::InsideScript);

        // Neither do self-closing ones.
        extractor.feed(&Token::StartTag {
            name: "br".to_string(),
            self_closing: true,
        });
        assert_eq!(extractor.state(), ScanState::InsideScript);

        extractor.feed(&start("p"));
        assert_eq!(extractor.state(), ScanState::Scanning);
    }

    #[test]
    fn test_feed_skips_blank_segments() {
        let mut extractor = TextExtractor::new();
        extractor.feed(&Token::Text("   \n\t ".to_string()));
        extractor.feed(&Token::Text(" a ".to_string()));
        assert_eq!(extractor.segments(), ["a"]);
    }

    #[test]
    fn test_feed_unescapes_before_trimming() {
        let mut extractor = TextExtractor::new();
        extractor.feed(&Token::Text("&#32;a &amp;amp; b&#32;".to_string()));
        extractor.feed(&Token::Text("&#10;".to_string()));
        assert_eq!(extractor.segments(), ["a &amp; b"]);
    }
}
