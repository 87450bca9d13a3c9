// SPDX-License-Identifier: PMPL-1.0-or-later

//! Line grammar of preprocessed qstr input

use regex::Regex;
use std::sync::OnceLock;

/// One recognised input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `QCFG(NAME, VALUE)`; surrounding parentheses already stripped from the value
    Config { name: &'a str, value: &'a str },
    /// `TRANSLATE("TEXT")`; text kept C-escaped
    Translate(&'a str),
    /// `Q(EXPR)`; the `\n` and `\r\n` spellings already turned into control characters
    Qstr(String),
}

struct Patterns {
    config: Regex,
    translate: Regex,
    qstr: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        config: Regex::new(r"^QCFG\((.+), (.+)\)").expect("literal pattern"),
        translate: Regex::new(r#"^TRANSLATE\("(.*)"\)$"#).expect("literal pattern"),
        qstr: Regex::new(r"^Q\((.*)\)$").expect("literal pattern"),
    })
}

/// Classify one physical line. Unrecognised lines yield `None`.
pub fn parse_line(raw: &str) -> Option<Line<'_>> {
    let line = raw.trim();
    let patterns = patterns();

    if let Some(caps) = patterns.config.captures(line) {
        let name = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str();
        let value = value
            .strip_prefix('(')
            .and_then(|v| v.strip_suffix(')'))
            .unwrap_or(value);
        return Some(Line::Config { name, value });
    }

    if let Some(caps) = patterns.translate.captures(line) {
        return Some(Line::Translate(caps.get(1)?.as_str()));
    }

    let caps = patterns.qstr.captures(line)?;
    let text = match caps.get(1)?.as_str() {
        "\\n" => "\n",
        "\\r\\n" => "\r\n",
        other => other,
    };
    Some(Line::Qstr(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_line_strips_parentheses() {
        assert_eq!(
            parse_line("QCFG(BYTES_IN_LEN, (1))"),
            Some(Line::Config {
                name: "BYTES_IN_LEN",
                value: "1"
            })
        );
        assert_eq!(
            parse_line("  QCFG(BYTES_IN_HASH, 2)  "),
            Some(Line::Config {
                name: "BYTES_IN_HASH",
                value: "2"
            })
        );
    }

    #[test]
    fn translate_line_keeps_escapes() {
        assert_eq!(
            parse_line(r#"TRANSLATE("Invalid %q\n")"#),
            Some(Line::Translate(r"Invalid %q\n"))
        );
    }

    #[test]
    fn qstr_line_recognises_control_spellings() {
        assert_eq!(parse_line("Q(hello)"), Some(Line::Qstr("hello".into())));
        assert_eq!(parse_line(r"Q(\n)"), Some(Line::Qstr("\n".into())));
        assert_eq!(parse_line(r"Q(\r\n)"), Some(Line::Qstr("\r\n".into())));
        assert_eq!(parse_line("Q()"), Some(Line::Qstr(String::new())));
        // only the exact spellings are converted
        assert_eq!(parse_line(r"Q(a\n)"), Some(Line::Qstr(r"a\n".into())));
    }

    #[test]
    fn other_lines_are_ignored() {
        assert_eq!(parse_line("# 1 \"py/qstr.c\""), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("QSTR(foo)"), None);
    }
}
