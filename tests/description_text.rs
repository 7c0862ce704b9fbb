use monster_scraper::{
    config::Description,
    text::{description_to_text, html_text},
};

fn all_cleanup() -> Description {
    Description {
        normalize_unicode: true,
        trim_trailing_whitespace: true,
        collapse_blank_lines: true,
    }
}

#[test]
fn strips_markup_like_get_text() {
    assert_eq!(
        html_text("<div><p>Hello <b>world</b></p><ul><li>Rust</li></ul></div>"),
        "Hello worldRust"
    );
    assert_eq!(html_text(""), "");
}

#[test]
fn decodes_entities() {
    assert_eq!(html_text("<p>R&amp;D &lt;team&gt;</p>"), "R&D <team>");
}

#[test]
fn default_keeps_extracted_text_verbatim() {
    let cfg = Description::default();
    let markup = "<p>a </p>\n\n\n<p>ﬁle</p>";
    assert_eq!(description_to_text(&cfg, markup), "a \n\n\nﬁle");
}

#[test]
fn cleanup_collapses_blank_runs_and_trailing_space() {
    let markup = "<p>Role  </p>\n\n\n\n<p>Duties</p>\n\n<p>Perks</p>";
    assert_eq!(
        description_to_text(&all_cleanup(), markup),
        "Role\n\nDuties\n\nPerks"
    );
}

#[test]
fn nfkc_folds_compatibility_characters() {
    assert_eq!(description_to_text(&all_cleanup(), "<p>ﬁle</p>"), "file");
}
