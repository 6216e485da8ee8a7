//! Integration tests for the token stream.

use domql_html::{Token, tokenize, unescape};

fn start(name: &str) -> Token {
    Token::StartTag {
        name: name.to_string(),
        self_closing: false,
    }
}

fn end(name: &str) -> Token {
    Token::EndTag {
        name: name.to_string(),
    }
}

fn text(data: &str) -> Token {
    Token::Text(data.to_string())
}

// ========== Tokens ==========

#[test]
fn test_empty_input() {
    assert_eq!(tokenize("").count(), 0);
}

#[test]
fn test_tags_and_text() {
    let tokens: Vec<Token> = tokenize("<p>Hi</p>").collect();
    assert_eq!(tokens, vec![start("p"), text("Hi"), end("p")]);
}

#[test]
fn test_tag_names_lowercased() {
    let tokens: Vec<Token> = tokenize("<DIV></Div>").collect();
    assert_eq!(tokens, vec![start("div"), end("div")]);
}

#[test]
fn test_attributes_not_in_name() {
    let tokens: Vec<Token> = tokenize(r#"<a href="/x" class=y>"#).collect();
    assert_eq!(tokens, vec![start("a")]);
}

#[test]
fn test_character_references_resolved() {
    let tokens: Vec<Token> = tokenize("a &amp; b").collect();
    assert_eq!(tokens, vec![text("a & b")]);
}

#[test]
fn test_script_body_is_raw_text() {
    let tokens: Vec<Token> = tokenize("<script>a<b</script>").collect();
    assert_eq!(tokens, vec![start("script"), text("a<b"), end("script")]);
}

#[test]
fn test_comment_and_doctype_are_other() {
    let tokens: Vec<Token> = tokenize("<!DOCTYPE html><!-- c -->").collect();
    assert_eq!(tokens, vec![Token::Other, Token::Other]);
}

#[test]
fn test_self_closing_flag() {
    let tokens: Vec<Token> = tokenize("<br/><hr />").collect();
    let expected = ["br", "hr"].map(|name| Token::StartTag {
        name: name.to_string(),
        self_closing: true,
    });
    assert_eq!(tokens, expected);
}

// ========== Unescaping ==========

#[test]
fn test_unescape_without_references_borrows() {
    assert!(matches!(unescape("a < b"), std::borrow::Cow::Borrowed("a < b")));
}

#[test]
fn test_unescape_references() {
    assert_eq!(unescape("a &amp; b &lt;i&gt; &#169; &#x41;"), "a & b <i> © A");
}

#[test]
fn test_unescape_keeps_markup_as_text() {
    assert_eq!(unescape("<p>&amp;</p>"), "<p>&</p>");
}

#[test]
fn test_unescape_legacy_and_unknown_references() {
    assert_eq!(unescape("&copy 2024 &bogus;"), "© 2024 &bogus;");
}
