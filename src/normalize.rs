use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\s*<!--.*?-->").unwrap());
static CHANT_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*/\s*").unwrap());

/// Text content of an element, with every text node trimmed and the pieces
/// glued together without a separator.
///
/// Comment nodes never show up here, which is why a heading such as
/// `<h2>Holy Apostle <!--1-->John</h2>` comes out as `Holy ApostleJohn`.
pub fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Remove `<!--...-->` remnants that leak into extracted text as literal
/// characters, together with the whitespace in front of them. Text after
/// the comment is left alone.
pub fn strip_html_comments(text: &str) -> String {
    HTML_COMMENT.replace_all(text, "").into_owned()
}

/// Normalize a saint's name taken from a listing heading.
pub fn clean_name(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    strip_html_comments(&collapsed).trim().to_string()
}

/// Turn the site's chant notation into real lines.
///
/// Hymn bodies mark the end of each poetic line with ` / `:
///
/// ```text
/// Thy holy martyrs, O Lord, / through their sufferings have received
/// ```
///
/// Every slash (and the whitespace around it) becomes a newline, trailing
/// whitespace is dropped from each line and the block itself is trimmed.
pub fn clean_chant_text(text: &str) -> String {
    let broken = CHANT_BREAK.replace_all(text, "\n");
    broken
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_clean_chant_text() {
        assert_eq!(
            clean_chant_text("Line one / Line two / Line three"),
            "Line one\nLine two\nLine three"
        );

        // Slashes without padding and trailing markers
        assert_eq!(clean_chant_text("Rejoice/O Virgin/ "), "Rejoice\nO Virgin");

        // Whitespace at the end of a line is dropped, leading text is kept
        assert_eq!(
            clean_chant_text("  O holy one \t/\n  pray for us  "),
            "O holy one\npray for us"
        );

        assert_eq!(clean_chant_text(""), "");
    }

    #[test]
    fn test_normalizers_are_idempotent() {
        let hymn = "Thy holy martyrs, O Lord, / through their sufferings / have received crowns";
        let once = clean_chant_text(hymn);
        assert_eq!(clean_chant_text(&once), once);

        let name = "  Venerable   Sergius\n of <!--x--> Radonezh ";
        let once = clean_name(name);
        assert_eq!(clean_name(&once), once);

        let spaced = collapse_whitespace("a \t b\n\nc");
        assert_eq!(collapse_whitespace(&spaced), spaced);
    }

    #[test]
    fn test_strip_html_comments() {
        assert_eq!(clean_name("Holy Apostle <!--12345-->John"), "Holy ApostleJohn");
        assert_eq!(strip_html_comments("Saint<!-- a\nmultiline\ncomment -->Name"), "SaintName");
        assert_eq!(
            strip_html_comments("<!--1-->Martyr <!--2--> Thecla"),
            "Martyr Thecla"
        );
        assert_eq!(clean_name("Martyr <!--2--> Thecla"), "Martyr Thecla");
        assert_eq!(clean_name("Martyr   <!--2-->   Thecla"), "Martyr Thecla");
        assert_eq!(strip_html_comments("No comments here"), "No comments here");
    }

    #[test]
    fn test_clean_name_collapses_whitespace() {
        assert_eq!(
            clean_name("\n   Great-martyr\n\t  George   the Trophy-bearer "),
            "Great-martyr George the Trophy-bearer"
        );
    }

    #[test]
    fn test_stripped_text_matches_comment_node_handling() {
        let html = Html::parse_fragment("<h2 class=\"name\">Holy Apostle <!--12345-->John\n</h2>");
        let selector = Selector::parse("h2").unwrap();
        let h2 = html.select(&selector).next().unwrap();

        let text = stripped_text(h2);
        assert_eq!(text, "Holy ApostleJohn");
        assert_eq!(clean_name(&text), "Holy ApostleJohn");
    }
}
