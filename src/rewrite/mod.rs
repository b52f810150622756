//! Plain-text rewriting of root-relative references into relative ones.
//!
//! The rules are regular expressions, not parsers. The string-literal rule in particular
//! touches every quoted value starting with a single `/` in script and data files, whether
//! or not it names an asset.

mod rules;

use crate::models::AssetKind;

/// Rewrite `text` for a file of the given kind.
///
/// Rules run in a fixed order, each over the output of the previous one: `src`/`href`
/// attributes, then `url(...)`, then quoted literals for scripts and data files.
/// Protocol-relative (`//host`) and scheme-qualified references are never altered.
pub fn rewrite_text(text: &str, kind: AssetKind) -> String {
    let rules = rules::root_relative_rules();

    let text = rules.attribute.apply(text);
    let text = rules.stylesheet_url.apply(&text);
    if kind.rewrites_string_literals() {
        rules.string_literal.apply(&text)
    } else {
        text
    }
}
