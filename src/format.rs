use crate::models::OutputDocument;

/// Render the post:
///
/// ```text
/// ## [Name - 05 March](https://www.oca.org/saints/lives/...)
///
/// ![Name](https://images.oca.org/icons/lg/...)
///
/// 🎶troparion🎶
///
/// ...
///
/// 🎶kontakion🎶
///
/// ...
///
/// #Christian #OrthodoxChristian ...
/// ```
///
/// The icon and hymn sections are left out when empty.
pub fn format_output(doc: &OutputDocument, hashtags: &str) -> String {
    let name = &doc.saint.name;
    let day_str = doc.date.format("%d %B");

    let mut lines = vec![format!("## [{name} - {day_str}]({})", doc.life_url), String::new()];

    if !doc.saint.icon_url.is_empty() {
        lines.push(format!("![{name}]({})", doc.saint.icon_url));
        lines.push(String::new());
    }

    for (label, text) in [("troparion", &doc.hymns.troparion), ("kontakion", &doc.hymns.kontakion)] {
        if !text.is_empty() {
            lines.push(format!("🎶{label}🎶"));
            lines.push(String::new());
            lines.push(text.clone());
            lines.push(String::new());
        }
    }

    lines.push(hashtags.to_string());

    lines.join("\n")
}
