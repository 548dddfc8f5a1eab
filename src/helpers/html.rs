//! HTML helper functions

/// Escape text for use in HTML content or a quoted attribute
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Whether a link leaves the site (has a scheme or is protocol-relative)
pub fn is_absolute_link(href: &str) -> bool {
    if href.starts_with("//") {
        return true;
    }
    match href.find(':') {
        Some(pos) => {
            let scheme = &href[..pos];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_is_absolute_link() {
        assert!(is_absolute_link("https://example.com"));
        assert!(is_absolute_link("mailto:team@example.com"));
        assert!(is_absolute_link("//cdn.example.com/x.js"));
        assert!(!is_absolute_link("/guides/setup"));
        assert!(!is_absolute_link("setup"));
        assert!(!is_absolute_link("#install"));
    }
}
