//! Markdown and plain-text export payloads.
//!
//! Both are deterministic: identical input and date yield identical bytes.

use chrono::NaiveDate;

/// Markdown export: a one-line generation-timestamp header prepended to the
/// untouched generated text.
pub fn markdown_export(markdown: &str, date: NaiveDate) -> Vec<u8> {
    format!("*Generated on {}*\n\n{}", date.format("%Y-%m-%d"), markdown).into_bytes()
}

/// Plain-text export: every `#` and `*` character removed.
///
/// This is a blunt character strip, not full markdown stripping: `-` bullet
/// markers and `_` emphasis survive verbatim.
pub fn text_export(markdown: &str) -> Vec<u8> {
    markdown
        .chars()
        .filter(|c| *c != '#' && *c != '*')
        .collect::<String>()
        .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
    }

    #[test]
    fn test_markdown_export_is_header_plus_unmodified_text() {
        let text = "# Jane Doe\n\n## Experience\n- Built X\n";
        let bytes = markdown_export(text, fixed_date());
        let out = String::from_utf8(bytes).unwrap();
        assert_eq!(out, format!("*Generated on 2024-03-15*\n\n{text}"));
    }

    #[test]
    fn test_text_export_strips_hashes_and_stars() {
        let text = "# Jane **Doe**\n* starred\n";
        let out = String::from_utf8(text_export(text)).unwrap();
        assert!(!out.contains('#'));
        assert!(!out.contains('*'));
        assert_eq!(out, " Jane Doe\n starred\n");
    }

    #[test]
    fn test_text_export_preserves_dashes_and_underscores() {
        let text = "- bullet with _emphasis_ and a - dash\n";
        let out = String::from_utf8(text_export(text)).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_exports_are_deterministic() {
        let text = "## Skills\n- Rust\n";
        assert_eq!(
            markdown_export(text, fixed_date()),
            markdown_export(text, fixed_date())
        );
        assert_eq!(text_export(text), text_export(text));
    }
}
