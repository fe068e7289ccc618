//! Inline span markup: `[u]`, `[mark=]`, `[color=]`, `[size=]`, `[font=]`

use std::fmt;

/// A rendered fragment containing only HTML-escaped text plus the fixed
/// whitelist of span tags emitted by [`render_inline`]. Nothing else
/// constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const ALLOWED_FONTS: [&str; 3] = ["EB Garamond", "Newsreader", "Inter"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanTag {
    Underline,
    Mark,
    Color,
    Size,
    Font,
}

/// One lexed piece of an inline run. Open and close tokens are
/// independent; there is no nesting validation, so unbalanced markup
/// simply yields unmatched HTML tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineToken<'a> {
    Text(&'a str),
    Open(SpanTag, Option<&'a str>),
    Close(SpanTag),
}

/// Splits text into literal runs and recognized `[tag]`/`[/tag]` tokens.
/// Anything that does not lex as a known tag stays literal, including a
/// stray `[`.
pub fn tokenize(text: &str) -> Vec<InlineToken<'_>> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let candidate = &rest[open..];
        match candidate[1..].find(']') {
            Some(close) => {
                let inner = &candidate[1..1 + close];
                match parse_tag(inner) {
                    Some(token) => {
                        if open > 0 {
                            tokens.push(InlineToken::Text(&rest[..open]));
                        }
                        tokens.push(token);
                        rest = &candidate[close + 2..];
                    }
                    None => {
                        tokens.push(InlineToken::Text(&rest[..open + 1]));
                        rest = &candidate[1..];
                    }
                }
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        tokens.push(InlineToken::Text(rest));
    }
    tokens
}

fn parse_tag(inner: &str) -> Option<InlineToken<'_>> {
    if let Some(name) = inner.strip_prefix('/') {
        return tag_by_name(name).map(InlineToken::Close);
    }
    if inner.eq_ignore_ascii_case("u") {
        return Some(InlineToken::Open(SpanTag::Underline, None));
    }
    let (name, value) = inner.split_once('=')?;
    if value.is_empty() {
        return None;
    }
    let tag = tag_by_name(name)?;
    if tag == SpanTag::Underline {
        return None;
    }
    Some(InlineToken::Open(tag, Some(value)))
}

fn tag_by_name(name: &str) -> Option<SpanTag> {
    if name.eq_ignore_ascii_case("u") {
        Some(SpanTag::Underline)
    } else if name.eq_ignore_ascii_case("mark") {
        Some(SpanTag::Mark)
    } else if name.eq_ignore_ascii_case("color") {
        Some(SpanTag::Color)
    } else if name.eq_ignore_ascii_case("size") {
        Some(SpanTag::Size)
    } else if name.eq_ignore_ascii_case("font") {
        Some(SpanTag::Font)
    } else {
        None
    }
}

/// Renders an inline run. Literal text and tag payloads are HTML-escaped
/// before any tag markup is emitted, so user input can never introduce
/// structure outside the span whitelist.
pub fn render_inline(text: &str) -> SanitizedHtml {
    let mut out = String::with_capacity(text.len());
    for token in tokenize(text) {
        match token {
            InlineToken::Text(literal) => out.push_str(&escape_html(literal)),
            InlineToken::Open(tag, value) => push_open_tag(&mut out, tag, value.unwrap_or("")),
            InlineToken::Close(SpanTag::Underline) => out.push_str("</u>"),
            InlineToken::Close(_) => out.push_str("</span>"),
        }
    }
    SanitizedHtml(out)
}

fn push_open_tag(out: &mut String, tag: SpanTag, value: &str) {
    // Payloads go through the same escaper as literal text; mark and
    // color values are trimmed but not checked against a CSS color
    // grammar.
    let payload = escape_html(value);
    match tag {
        SpanTag::Underline => out.push_str("<u>"),
        SpanTag::Mark => {
            out.push_str("<span style=\"background:");
            out.push_str(payload.trim());
            out.push_str(";padding:0 2px;border-radius:2px\">");
        }
        SpanTag::Color => {
            out.push_str("<span style=\"color:");
            out.push_str(payload.trim());
            out.push_str("\">");
        }
        SpanTag::Size => {
            let numeric: String = payload
                .chars()
                .filter(|ch| ch.is_ascii_digit() || *ch == '.')
                .collect();
            out.push_str("<span style=\"font-size:");
            if numeric.is_empty() {
                out.push_str("inherit");
            } else {
                out.push_str(&numeric);
                out.push_str("px");
            }
            out.push_str("\">");
        }
        SpanTag::Font => {
            let name = payload.trim();
            if ALLOWED_FONTS.contains(&name) {
                out.push_str("<span style=\"font-family:");
                out.push_str(name);
                out.push_str("\">");
            } else {
                out.push_str("<span>");
            }
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
