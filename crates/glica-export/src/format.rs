//! Handout text to HTML.
//!
//! Section texts arrive with `\n` paragraph breaks, `* `/`- ` list markers
//! and `*bold*` emphasis. List detection runs per line before emphasis, so
//! a `* ` marker is never consumed as an asterisk pair.

/// Render one handout section to an HTML fragment.
pub fn format_text(text: &str) -> String {
    let mut html = String::new();
    let mut list_open = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(item) = trimmed
            .strip_prefix("* ")
            .or_else(|| trimmed.strip_prefix("- "))
        {
            if !list_open {
                html.push_str("<ul>");
                list_open = true;
            }
            html.push_str("<li>");
            html.push_str(&apply_bold(item));
            html.push_str("</li>");
        } else {
            if list_open {
                html.push_str("</ul>");
                list_open = false;
            }
            if !trimmed.is_empty() {
                html.push_str("<p>");
                html.push_str(&apply_bold(trimmed));
                html.push_str("</p>");
            }
        }
    }
    if list_open {
        html.push_str("</ul>");
    }

    html
}

/// `*span*` → `<strong>span</strong>`. Unpaired or empty asterisk pairs are
/// left as literal text.
fn apply_bold(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(open) = rest.find('*') {
        match rest[open + 1..].find('*') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push_str("<strong>");
                out.push_str(&rest[open + 1..open + 1 + close]);
                out.push_str("</strong>");
                rest = &rest[open + close + 2..];
            }
            _ => {
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}
