//! Output sanitizing for upstream-controlled text.
//!
//! Card text comes from a third-party scraper and is untrusted. Anything that
//! ends up in markup goes through `escape_html`; anything drawn to a terminal
//! goes through `terminal_safe`.

use crate::card::CanonicalCard;

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strip control characters (ESC, CR, BEL, C1 controls, ...) so upstream text
/// cannot move the cursor or restyle the terminal. Tabs and newlines become
/// plain spaces.
pub fn terminal_safe(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\t' | '\n' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// One card as an HTML fragment. Empty optional fields are omitted.
pub fn card_html(card: &CanonicalCard) -> String {
    let mut html = String::from("<div class=\"match-card\">\n  <div class=\"card-row\">\n");
    if !card.logo.is_empty() {
        html.push_str(&format!(
            "    <img src=\"{}\" class=\"team-logo\" alt=\"logo\" />\n",
            escape_html(&card.logo)
        ));
    }
    html.push_str("    <div class=\"card-body\">\n");
    html.push_str(&format!(
        "      <div class=\"match-title\">{}{}</div>\n",
        escape_html(&card.title),
        if card.is_live {
            " <span class=\"live-badge\">LIVE</span>"
        } else {
            ""
        }
    ));
    if !card.note.is_empty() {
        html.push_str(&format!(
            "      <div class=\"match-note\">{}</div>\n",
            escape_html(&card.note)
        ));
    }
    html.push_str("    </div>\n");
    if !card.league_logo.is_empty() {
        html.push_str(&format!(
            "    <img src=\"{}\" class=\"league-logo\" alt=\"league\" />\n",
            escape_html(&card.league_logo)
        ));
    }
    html.push_str("  </div>\n");
    if card.has_stream() {
        html.push_str(&format!(
            "  <a class=\"watch-btn\" data-stream=\"{}\">▶ Watch</a>\n",
            escape_html(&card.stream_ref)
        ));
    }
    html.push_str("</div>\n");
    html
}

/// A standalone page with one section per non-empty card list.
pub fn page_html(title: &str, sections: &[(&str, &[CanonicalCard])]) -> String {
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{}</title>\n</head>\n<body>\n",
        escape_html(title)
    );
    for (heading, cards) in sections {
        if cards.is_empty() {
            continue;
        }
        html.push_str(&format!("<h2>{}</h2>\n<section>\n", escape_html(heading)));
        for card in cards.iter() {
            html.push_str(&card_html(card));
        }
        html.push_str("</section>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UNSAFE: &str = r#"<b onclick="x('1')">Tom & Jerry</b>"#;

    #[test]
    fn test_escape_neutralizes_all_five() {
        let escaped = escape_html(UNSAFE);
        for c in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(c), "{} survived in {}", c, escaped);
        }
        assert_eq!(
            escaped,
            "&lt;b onclick=&quot;x(&#39;1&#39;)&quot;&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_is_fixed_point_for_safe_text() {
        for s in ["", "Arsenal vs Chelsea", "Premier League • 20:00", "ünïcödé"] {
            assert_eq!(escape_html(s), s);
            assert_eq!(escape_html(&escape_html(s)), s);
        }
    }

    #[test]
    fn test_double_escape_differs_for_unsafe_text() {
        let once = escape_html(UNSAFE);
        let twice = escape_html(&once);
        assert_ne!(once, twice);
        assert!(twice.contains("&amp;lt;"));
    }

    #[test]
    fn test_terminal_safe_strips_escapes() {
        assert_eq!(terminal_safe("A\x1b[31m vs B\x07"), "A[31m vs B");
        assert_eq!(terminal_safe("line\nbreak\ttab\r"), "line break tab");
        assert_eq!(terminal_safe("plain • text"), "plain • text");
    }

    #[test]
    fn test_card_html_escapes_and_omits_empty() {
        let card = CanonicalCard::from_raw(&json!({
            "title": "<script>alert(1)</script>",
            "note": "LIVE & loud",
        }));
        let html = card_html(&card);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("LIVE &amp; loud"));
        assert!(html.contains("live-badge"));
        assert!(!html.contains("team-logo"));
        assert!(!html.contains("league-logo"));
        assert!(!html.contains("watch-btn"));
    }

    #[test]
    fn test_page_html_skips_empty_sections() {
        let live = vec![CanonicalCard::from_raw(&json!({"home": "A", "away": "B"}))];
        let upcoming: Vec<CanonicalCard> = Vec::new();
        let html = page_html(
            "matches",
            &[("Live", live.as_slice()), ("Upcoming", upcoming.as_slice())],
        );
        assert!(html.contains("<h2>Live</h2>"));
        assert!(!html.contains("<h2>Upcoming</h2>"));
        assert!(html.contains("A vs B"));
    }
}
