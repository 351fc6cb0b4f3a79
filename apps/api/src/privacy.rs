use std::sync::OnceLock;

use regex::Regex;

const MASK: &str = "***";

/// Same digit class the phone validator accepts, so any validated number keeps its tail.
fn digit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d").expect("valid digit regex"))
}

/// Masks an email's local part or all but the last four digits of a phone number.
///
/// Empty input is returned unchanged. Anything containing `@` is treated as an
/// email; everything else as a phone number.
pub fn mask_contact(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    if let Some((local, domain)) = value.split_once('@') {
        let first = local.chars().next().map(String::from).unwrap_or_default();
        return format!("{first}{MASK}@{domain}");
    }

    let digits: Vec<&str> = digit_re().find_iter(value).map(|m| m.as_str()).collect();
    if digits.len() >= 4 {
        format!("{MASK}{}", digits[digits.len() - 4..].concat())
    } else {
        MASK.to_string()
    }
}
