//! Minimal tolerant markup tokenizer.
//!
//! Produces start tag, end tag, and text events. Comments, doctypes and
//! processing instructions are skipped; `script`/`style` bodies are skipped
//! as raw text. Tag and attribute names are lowercased. Delimiters are all
//! ASCII so byte-index slicing stays on char boundaries.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Start {
        name: String,
        attrs: Vec<(String, String)>,
    },
    End {
        name: String,
    },
    Text(Cow<'a, str>),
}

impl Token<'_> {
    /// Attribute lookup on a start tag.
    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            Token::Start { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn text_until_next_tag(&mut self, from: usize) -> Token<'a> {
        let end = self.input[from..]
            .find('<')
            .map_or(self.input.len(), |i| from + i);
        let text = &self.input[self.pos..end];
        self.pos = end;
        Token::Text(decode_entities(text))
    }

    fn skip_past(&mut self, needle: &str, from: usize) {
        self.pos = self.input[from..]
            .find(needle)
            .map_or(self.input.len(), |i| from + i + needle.len());
    }

    /// Index of the `>` closing the tag that starts at `start`, honoring quotes.
    fn tag_end(&self, start: usize) -> Option<usize> {
        let mut quote: Option<u8> = None;
        for (offset, byte) in self.input.as_bytes()[start..].iter().copied().enumerate() {
            match (quote, byte) {
                (Some(q), b) if b == q => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(byte),
                (None, b'>') => return Some(start + offset),
                (None, _) => {}
            }
        }
        None
    }

    /// Position of the next `</name` (case-insensitive) at or after `from`.
    fn raw_text_end(&self, from: usize, name: &str) -> usize {
        let bytes = self.input.as_bytes();
        self.input[from..]
            .match_indices("</")
            .map(|(i, _)| from + i)
            .find(|&at| {
                let name_start = at + 2;
                let name_end = name_start + name.len();
                name_end <= bytes.len()
                    && bytes[name_start..name_end].eq_ignore_ascii_case(name.as_bytes())
            })
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }
            let rest = &self.input[self.pos..];
            if !rest.starts_with('<') {
                return Some(self.text_until_next_tag(self.pos));
            }

            if rest.starts_with("<!--") {
                self.skip_past("-->", self.pos + 4);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">", self.pos + 2);
                continue;
            }

            let is_end = rest.starts_with("</");
            let name_at = if is_end { 2 } else { 1 };
            let starts_name = rest.as_bytes().get(name_at).is_some_and(u8::is_ascii_alphabetic);
            if !starts_name {
                // A stray '<' is plain text.
                return Some(self.text_until_next_tag(self.pos + 1));
            }

            let Some(close) = self.tag_end(self.pos) else {
                self.pos = self.input.len();
                return None;
            };
            let inner = &self.input[self.pos + name_at..close];
            self.pos = close + 1;

            if is_end {
                let name = tag_name(inner);
                return Some(Token::End { name });
            }

            let (name, attrs) = parse_start_tag(inner);
            if name == "script" || name == "style" {
                self.pos = self.raw_text_end(self.pos, &name);
            }
            return Some(Token::Start { name, attrs });
        }
    }
}

fn tag_name(inner: &str) -> String {
    inner
        .split(|c: char| c.is_ascii_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn parse_start_tag(inner: &str) -> (String, Vec<(String, String)>) {
    let inner = inner.trim_end().trim_end_matches('/');
    let name = tag_name(inner);
    let bytes = inner.as_bytes();
    let mut attrs = Vec::new();
    let mut i = name.len();

    while i < bytes.len() {
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        let key_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'=' | b'/')
        {
            i += 1;
        }
        if key_start == i {
            break;
        }
        let key = inner[key_start..i].to_ascii_lowercase();

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            attrs.push((key, String::new()));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = match bytes.get(i) {
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = i + 1;
                let value_end = inner[value_start..]
                    .find(quote as char)
                    .map_or(inner.len(), |offset| value_start + offset);
                i = (value_end + 1).min(bytes.len());
                &inner[value_start..value_end]
            }
            _ => {
                let value_start = i;
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                &inner[value_start..i]
            }
        };
        attrs.push((key, decode_entities(value).into_owned()));
    }

    (name, attrs)
}

/// Decode the character references that show up in published tables.
///
/// Unknown references are left untouched.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| decode_reference(&after[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(reference: &str) -> Option<char> {
    if let Some(numeric) = reference.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match reference {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input).collect()
    }

    #[test]
    fn tokenizes_tags_and_text() {
        let toks = tokens(r#"<TABLE id="t1" class=wide><td>A &amp; B</td></TABLE>"#);
        assert_eq!(toks.len(), 5);
        assert_eq!(toks[0].attr("id"), Some("t1"));
        assert_eq!(toks[0].attr("class"), Some("wide"));
        assert_eq!(toks[2], Token::Text(Cow::Borrowed("A & B")));
        assert_eq!(
            toks[4],
            Token::End {
                name: "table".to_string()
            }
        );
    }

    #[test]
    fn skips_comments_doctype_and_script_bodies() {
        let toks = tokens(
            "<!DOCTYPE html><!-- <table id=x> --><script>if (a < b) { '</td>' }</script>ok",
        );
        let names: Vec<_> = toks
            .iter()
            .map(|t| match t {
                Token::Start { name, .. } => format!("+{name}"),
                Token::End { name } => format!("-{name}"),
                Token::Text(text) => text.to_string(),
            })
            .collect();
        assert_eq!(names, vec!["+script", "-script", "ok"]);
    }

    #[test]
    fn quoted_gt_does_not_close_tag() {
        let toks = tokens(r#"<a title="x > y" href='/z'>link</a>"#);
        assert_eq!(toks[0].attr("title"), Some("x > y"));
        assert_eq!(toks[0].attr("href"), Some("/z"));
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        let toks = tokens("3 < 4");
        let text: String = toks
            .iter()
            .map(|t| match t {
                Token::Text(text) => text.to_string(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(text, "3 < 4");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("9.427&#37;"), "9.427%");
        assert_eq!(decode_entities("&#x41;&nbsp;B"), "A\u{a0}B");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }
}
