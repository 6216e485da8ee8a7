use std::borrow::Cow;

use html5gum::{DefaultEmitter, Tokenizer};

/// A lexical token of an HTML fragment.
///
/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// Only the kinds the text extractor distinguishes are kept apart; comments
/// and DOCTYPEs collapse into [`Token::Other`]. Parse errors are dropped:
/// the tokenizer recovers from them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "Start and end tag tokens have a tag name"
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// Written as `<name/>`.
        self_closing: bool,
    },
    /// A closing tag.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },
    /// A run of character data with character references already resolved.
    Text(String),
    /// Comment or DOCTYPE.
    Other,
}

/// Tokenize an HTML fragment.
///
/// The stream ends when the input is exhausted. After a `script`, `style`,
/// `title`, `textarea` (and similar) start tag the tokenizer switches to the
/// matching raw-text state, so `<` inside a script body does not open tags.
pub fn tokenize(fragment: &str) -> impl Iterator<Item = Token> + '_ {
    let mut emitter: DefaultEmitter = DefaultEmitter::default();
    emitter.switch_states(true);

    Tokenizer::new_with_emitter(fragment, emitter)
        .infallible()
        .filter_map(|token| match token {
            html5gum::Token::StartTag(tag) => Some(Token::StartTag {
                name: String::from_utf8_lossy(&tag.name).into_owned(),
                self_closing: tag.self_closing,
            }),
            html5gum::Token::EndTag(tag) => Some(Token::EndTag {
                name: String::from_utf8_lossy(&tag.name).into_owned(),
            }),
            html5gum::Token::String(text) => {
                Some(Token::Text(String::from_utf8_lossy(&text).into_owned()))
            }
            html5gum::Token::Comment(_) | html5gum::Token::Doctype(_) => Some(Token::Other),
            // Parse errors
            _ => None,
        })
}

/// Resolve the character references in `text`.
///
/// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
///
/// References are decoded the way the data state decodes them, legacy
/// names without a trailing `;` included. Every `<` is escaped first so the
/// whole input stays character data.
#[must_use]
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let data = text.replace('<', "&lt;");
    Cow::Owned(
        tokenize(&data)
            .filter_map(|token| match token {
                Token::Text(text) => Some(text),
                _ => None,
            })
            .collect(),
    )
}
