//! Display helpers for registry records
//!
//! All functions here are total: they never panic and never return an
//! error, falling back to the input when there is nothing to do.

/// Help page shown in the error panel and the "more results" link
pub const ANNUAIRE_SEARCH_URL: &str = "https://annuaire-entreprises.data.gouv.fr/recherche-siren";

/// Default label of [`annuaire_link`]
pub const DEFAULT_LINK_LABEL: &str = "l’Annuaire des Entreprises";

/// Group the trailing digits of `s` by three, counted from the right.
///
/// `"123456789"` becomes `"123 456 789"`. Anything before the trailing digit
/// run is kept as is, and a string that does not end with a digit comes back
/// unchanged.
pub fn format_int_fr(s: &str) -> String {
    let digits_start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);

    let Some(start) = digits_start else {
        return s.to_string();
    };

    let (prefix, digits) = s.split_at(start);
    let mut out = String::with_capacity(s.len() + digits.len() / 3);
    out.push_str(prefix);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Link to the Annuaire des Entreprises search page.
pub fn annuaire_link(label: Option<&str>) -> String {
    format!(
        "<a target=\"_blank\" href='{}'>{}</a>",
        ANNUAIRE_SEARCH_URL,
        label.unwrap_or(DEFAULT_LINK_LABEL)
    )
}

/// Escape text coming from the registry before it goes into markup.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int_fr_groups_siren() {
        assert_eq!(format_int_fr("123456789"), "123 456 789");
        assert_eq!(format_int_fr("414971929"), "414 971 929");
    }

    #[test]
    fn test_format_int_fr_uneven_lengths() {
        assert_eq!(format_int_fr("1"), "1");
        assert_eq!(format_int_fr("12"), "12");
        assert_eq!(format_int_fr("123"), "123");
        assert_eq!(format_int_fr("1234"), "1 234");
        assert_eq!(format_int_fr("41497192900040"), "41 497 192 900 040");
    }

    #[test]
    fn test_format_int_fr_keeps_digits_in_order() {
        for s in ["9", "90", "908", "9081", "90817", "908172", "9081726354"] {
            let formatted = format_int_fr(s);
            assert_eq!(formatted.replace(' ', ""), s);
            for group in formatted.split(' ').skip(1) {
                assert_eq!(group.len(), 3, "{formatted}");
            }
        }
    }

    #[test]
    fn test_format_int_fr_non_numeric() {
        assert_eq!(format_int_fr(""), "");
        assert_eq!(format_int_fr("abc"), "abc");
        assert_eq!(format_int_fr("1234a"), "1234a");
        assert_eq!(format_int_fr("ab123456"), "ab123 456");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ganymede"), "Ganymede");
        assert_eq!(capitalize("FINANCIERE GANYMEDE"), "Financiere ganymede");
        assert_eq!(capitalize("éCOLE"), "École");
    }

    #[test]
    fn test_capitalize_preserves_length() {
        for s in ["a", "association ganymede", "L'UNION", "x1Y2z3"] {
            assert_eq!(capitalize(s).chars().count(), s.chars().count());
        }
    }

    #[test]
    fn test_annuaire_link() {
        let default = annuaire_link(None);
        assert!(default.contains(ANNUAIRE_SEARCH_URL));
        assert!(default.ends_with(">l’Annuaire des Entreprises</a>"));

        let custom = annuaire_link(Some("ici"));
        assert!(custom.ends_with(">ici</a>"));
        assert!(custom.contains("target=\"_blank\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("L'UNION"), "L&#39;UNION");
        assert_eq!(escape_html("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
