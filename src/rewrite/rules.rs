use std::sync::OnceLock;

use regex::{Captures, Regex};

/// A substitution that strips the single leading `/` of a root-relative reference.
///
/// `regex` has no lookahead, so every pattern ends on the `/` and [`RootRelativeRule::apply`]
/// checks the following byte itself. A match followed by a second `/` is a protocol-relative
/// URL and the search resumes one character past the match start, the same way a
/// `/(?!/)` lookahead would let the engine move on.
pub(crate) struct RootRelativeRule {
    pattern: Regex,
    render: fn(&Captures<'_>) -> String,
}

impl RootRelativeRule {
    fn new(pattern: &str, render: fn(&Captures<'_>) -> String) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("invalid root-relative regex"),
            render,
        }
    }

    /// Apply the rule to every non-overlapping occurrence in `text`.
    pub(crate) fn apply(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut copied = 0;
        let mut search = 0;

        while search <= text.len() {
            let Some(caps) = self.pattern.captures_at(text, search) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if text.as_bytes().get(whole.end()) == Some(&b'/') {
                let first_len = text[whole.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                search = whole.start() + first_len;
                continue;
            }

            output.push_str(&text[copied..whole.start()]);
            output.push_str(&(self.render)(&caps));
            copied = whole.end();
            search = whole.end();
        }

        output.push_str(&text[copied..]);
        output
    }
}

/// The three rules, compiled once.
pub(crate) struct RootRelativeRules {
    /// `src=` / `href=` attributes.
    pub(crate) attribute: RootRelativeRule,
    /// Stylesheet `url(...)` functions.
    pub(crate) stylesheet_url: RootRelativeRule,
    /// Quoted string literals, script and data files only.
    pub(crate) string_literal: RootRelativeRule,
}

/// Whitespace accepted around `=` and after `url(`.
///
/// This is the ECMAScript `\s` set: it includes U+FEFF and excludes U+0085, which Unicode
/// `White_Space` (and so the `regex` crate's `\s`) gets the other way round.
const SPACE: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

pub(crate) fn root_relative_rules() -> &'static RootRelativeRules {
    static RULES: OnceLock<RootRelativeRules> = OnceLock::new();
    RULES.get_or_init(|| RootRelativeRules {
        // Word boundary and case folding are ASCII-only: `ésrc=` matches, `ſrc=` does not.
        attribute: RootRelativeRule::new(
            &format!(r#"((?-u:\b)(?i-u:src|href){SPACE}*={SPACE}*)(["']?)/"#),
            render_attribute,
        ),
        stylesheet_url: RootRelativeRule::new(
            &format!(r"((?i-u:url)\(){SPACE}*/"),
            render_stylesheet_url,
        ),
        string_literal: RootRelativeRule::new(r#"(["'])/"#, render_string_literal),
    })
}

fn render_attribute(caps: &Captures<'_>) -> String {
    let quote = caps.get(2).map_or("", |m| m.as_str());
    let quote = if quote.is_empty() { "\"" } else { quote };
    format!("{}{}", &caps[1], quote)
}

fn render_stylesheet_url(caps: &Captures<'_>) -> String {
    caps[1].to_string()
}

fn render_string_literal(caps: &Captures<'_>) -> String {
    caps[1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_rule_keeps_quote_style() {
        let rules = root_relative_rules();
        assert_eq!(
            rules.attribute.apply(r#"<img src="/a.png"><a href='/b'>"#),
            r#"<img src="a.png"><a href='b'>"#
        );
    }

    #[test]
    fn attribute_rule_defaults_to_double_quote() {
        let rules = root_relative_rules();
        assert_eq!(rules.attribute.apply("<img src=/a.png>"), "<img src=\"a.png>");
    }

    #[test]
    fn attribute_rule_allows_spacing_and_case() {
        let rules = root_relative_rules();
        assert_eq!(
            rules.attribute.apply(r#"<LINK HREF = "/main.css">"#),
            r#"<LINK HREF = "main.css">"#
        );
    }

    #[test]
    fn attribute_rule_requires_word_boundary() {
        let rules = root_relative_rules();
        let input = r#"<img data-src="/a.png" xsrc="/b.png">"#;
        assert_eq!(rules.attribute.apply(input), r#"<img data-src="a.png" xsrc="/b.png">"#);
    }

    #[test]
    fn attribute_boundary_and_case_are_ascii_only() {
        let rules = root_relative_rules();
        assert_eq!(rules.attribute.apply(r#"x=ésrc="/a.png""#), r#"x=ésrc="a.png""#);
        assert_eq!(rules.attribute.apply(r#"<img ſrc="/a.png">"#), r#"<img ſrc="/a.png">"#);
        assert_eq!(rules.attribute.apply(r#"<a HrEf="/b">"#), r#"<a HrEf="b">"#);
    }

    #[test]
    fn spacing_follows_script_whitespace_set() {
        let rules = root_relative_rules();
        assert_eq!(
            rules.attribute.apply("src=\u{FEFF}\"/a.png\""),
            "src=\u{FEFF}\"a.png\""
        );
        assert_eq!(
            rules.attribute.apply("src=\u{85}\"/a.png\""),
            "src=\u{85}\"/a.png\""
        );
        assert_eq!(rules.stylesheet_url.apply("url(\u{A0}/a.png)"), "url(a.png)");
        assert_eq!(rules.stylesheet_url.apply("url(\u{85}/a.png)"), "url(\u{85}/a.png)");
    }

    #[test]
    fn protocol_relative_matches_are_skipped_not_swallowed() {
        let rules = root_relative_rules();
        assert_eq!(
            rules.string_literal.apply(r#"'//cdn' '/local'"#),
            r#"'//cdn' 'local'"#
        );
    }

    #[test]
    fn adjacent_literals_are_each_rewritten() {
        let rules = root_relative_rules();
        assert_eq!(rules.string_literal.apply("'/'/x"), "''x");
    }

    #[test]
    fn trailing_slash_at_end_of_text_is_stripped() {
        let rules = root_relative_rules();
        assert_eq!(rules.string_literal.apply("\"/"), "\"");
    }

    #[test]
    fn stylesheet_rule_preserves_function_casing_and_drops_spacing() {
        let rules = root_relative_rules();
        assert_eq!(rules.stylesheet_url.apply("URL( /a.png)"), "URL(a.png)");
        assert_eq!(rules.stylesheet_url.apply("url(//cdn/a.png)"), "url(//cdn/a.png)");
    }

    #[test]
    fn multibyte_text_around_matches_is_preserved() {
        let rules = root_relative_rules();
        assert_eq!(
            rules.string_literal.apply("const é = '/ü/ß'; // ſ"),
            "const é = 'ü/ß'; // ſ"
        );
    }
}
