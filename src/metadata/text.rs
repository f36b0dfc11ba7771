//! Text derivation helpers shared by both normalization paths.

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}").expect("year regex should compile"));

static MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}-(\d{2})-\d{2}").expect("month regex should compile"));

static COLLAPSE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// First run of four digits in `date`, or an empty string.
///
/// ```
/// use avmeta::metadata::get_year;
///
/// assert_eq!(get_year("2021-05-12"), "2021");
/// assert_eq!(get_year("no-date-here"), "");
/// ```
pub fn get_year(date: &str) -> String {
    YEAR_PATTERN
        .find(date)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Month of the first full `YYYY-MM-DD` date in `date`, or an empty string.
///
/// ```
/// use avmeta::metadata::get_month;
///
/// assert_eq!(get_month("2021-05-12"), "05");
/// assert_eq!(get_month("2021"), "");
/// ```
pub fn get_month(date: &str) -> String {
    MONTH_PATTERN
        .captures(date)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Normalize HTML line breaks and carriage returns in a synopsis to `\n`.
pub fn intro_filter(intro: &str) -> String {
    let text = intro
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace("\n\n", "\n");
    text.trim().to_string()
}

/// Title that starts with `number` exactly once.
///
/// Every occurrence of `number` in `raw` is removed regardless of case, the
/// remaining words are re-joined with single spaces, and `number` is
/// prepended.
pub fn title_with_number(number: &str, raw: &str) -> String {
    let number = number.trim();
    if number.is_empty() {
        return collapse_whitespace(raw);
    }

    let stripped = match Regex::new(&format!("(?i){}", regex::escape(number))) {
        Ok(pattern) => pattern.replace_all(raw, " ").into_owned(),
        Err(_) => raw.replace(number, " "),
    };

    let rest = collapse_whitespace(&stripped);
    if rest.is_empty() {
        number.to_string()
    } else {
        format!("{number} {rest}")
    }
}

fn collapse_whitespace(text: &str) -> String {
    COLLAPSE_WHITESPACE
        .replace_all(text.trim(), " ")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_year() {
        assert_eq!(get_year("2021-05-12"), "2021");
        assert_eq!(get_year("released 1999"), "1999");
        assert_eq!(get_year("no-date-here"), "");
        assert_eq!(get_year(""), "");
    }

    #[test]
    fn test_get_month() {
        assert_eq!(get_month("2021-05-12"), "05");
        assert_eq!(get_month("on 2020-11-03 in Tokyo"), "11");
        assert_eq!(get_month("2021"), "");
        assert_eq!(get_month("2021-05"), "");
        assert_eq!(get_month("2021/05/12"), "");
    }

    #[test]
    fn test_intro_filter() {
        assert_eq!(intro_filter("  a<br>b<br/>c<br />d  "), "a\nb\nc\nd");
        assert_eq!(intro_filter("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(intro_filter("a<br><br>b"), "a\nb");
        assert_eq!(intro_filter(""), "");
    }

    #[test]
    fn test_title_with_number_strips_and_prepends() {
        assert_eq!(
            title_with_number("ABC-123", "Some ABC-123 Thing"),
            "ABC-123 Some Thing"
        );
        assert_eq!(
            title_with_number("ABC-123", "ABC-123 Some Thing"),
            "ABC-123 Some Thing"
        );
        assert_eq!(
            title_with_number("ABC-123", "Some Thing abc-123"),
            "ABC-123 Some Thing"
        );
        assert_eq!(title_with_number("ABC-123", "Some Thing"), "ABC-123 Some Thing");
    }

    #[test]
    fn test_title_with_number_edge_cases() {
        assert_eq!(title_with_number("ABC-123", "ABC-123"), "ABC-123");
        assert_eq!(title_with_number("ABC-123", ""), "ABC-123");
        assert_eq!(title_with_number("", "  Just   a title "), "Just a title");
        // regex metacharacters in the number are literal
        assert_eq!(title_with_number("A.B+1", "x AxB+1 A.B+1 y"), "A.B+1 x AxB+1 y");
    }
}
