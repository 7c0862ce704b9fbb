use crate::config::Description;
use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Plain text of a description fragment, cleaned per `[description]`.
pub fn description_to_text(cfg: &Description, markup: &str) -> String {
    let mut text = html_text(markup);

    if cfg.normalize_unicode {
        text = text.nfkc().collect::<String>();
    }

    if cfg.trim_trailing_whitespace {
        text = text
            .lines()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
    }

    if cfg.collapse_blank_lines {
        text = collapse_blank_lines(&text);
    }

    text
}

/// Concatenated text nodes, the same way a DOM `get_text()` reads them.
pub fn html_text(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(markup);
    fragment.root_element().text().collect::<String>()
}

fn collapse_blank_lines(s: &str) -> String {
    static BLANK_RUN: OnceLock<Regex> = OnceLock::new();
    let re = BLANK_RUN.get_or_init(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+\n").unwrap());
    re.replace_all(s, "\n\n").trim().to_string()
}
