//! Positional `%N` markers, substituted the way `QString::arg` does.
//!
//! A marker is `%` followed by an optional `L` (locale-aware formatting,
//! accepted but treated like the plain form) and one or two digits in
//! `1..=99`. `%0` and a bare `%` are left alone; `%123` reads as `%12`
//! followed by `3`.

use std::collections::BTreeSet;
use tracing::warn;

/// A marker occurrence inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset of the `%`.
    pub start: usize,
    /// Byte offset one past the last digit.
    pub end: usize,
    /// Marker number, `1..=99`.
    pub number: u8,
}

/// Every marker in `template`, in order of appearance.
pub fn scan(template: &str) -> Vec<Marker> {
    let bytes = template.as_bytes();
    let mut markers = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        if bytes.get(j) == Some(&b'L') {
            j += 1;
        }
        let digits_start = j;
        while j < bytes.len() && j - digits_start < 2 && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let number = template[digits_start..j].parse::<u8>().unwrap_or(0);
        if number == 0 {
            i += 1;
        } else {
            markers.push(Marker {
                start: i,
                end: j,
                number,
            });
            i = j;
        }
    }

    markers
}

/// The distinct marker numbers used by `template`.
pub fn markers(template: &str) -> BTreeSet<u8> {
    scan(template).into_iter().map(|m| m.number).collect()
}

/// Replace every occurrence of the lowest-numbered marker with `value`.
///
/// Returns the template unchanged, with a warning, when it has no marker.
pub fn arg(template: &str, value: impl AsRef<str>) -> String {
    let found = scan(template);
    let Some(lowest) = found.iter().map(|m| m.number).min() else {
        warn!(template, "arg: template has no free placeholder");
        return template.to_string();
    };

    substitute(template, &found, |number| {
        (number == lowest).then_some(value.as_ref())
    })
}

/// Substitute several values in one pass.
///
/// The lowest marker number receives `values[0]`, the next lowest
/// `values[1]` and so on. Substituted text is never scanned again, so a
/// value containing `%2` stays as written.
pub fn args<S: AsRef<str>>(template: &str, values: &[S]) -> String {
    let found = scan(template);
    let numbers: Vec<u8> = markers(template).into_iter().collect();
    if numbers.len() < values.len() {
        warn!(
            template,
            markers = numbers.len(),
            values = values.len(),
            "args: more values than placeholders"
        );
    }

    substitute(template, &found, |number| {
        let rank = numbers.iter().position(|&n| n == number)?;
        values.get(rank).map(|v| v.as_ref())
    })
}

/// Replace `%n` and `%Ln` with `n`, as done for numerus messages.
pub fn replace_count(template: &str, n: i64) -> String {
    let count = n.to_string();
    template.replace("%Ln", &count).replace("%n", &count)
}

fn substitute<'v>(
    template: &str,
    found: &[Marker],
    mut value_for: impl FnMut(u8) -> Option<&'v str>,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for marker in found {
        if let Some(value) = value_for(marker.number) {
            out.push_str(&template[last..marker.start]);
            out.push_str(value);
            last = marker.end;
        }
    }
    out.push_str(&template[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scan_markers() {
        assert_eq!(
            markers("<pre>Connection <strong>%1</strong>(%2) active</pre>"),
            BTreeSet::from([1, 2])
        );
        assert_eq!(markers("%L1 of %3 and %1"), BTreeSet::from([1, 3]));
        assert!(markers("100% done, %0, %").is_empty());
    }

    #[test]
    fn test_two_digit_markers() {
        let found = scan("%12%123");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].number, 12);
        assert_eq!(found[1].number, 12);
        assert_eq!(&"%12%123"[found[1].end..], "3");
    }

    #[test]
    fn test_arg_replaces_lowest_marker() {
        assert_eq!(arg("%1 about", "nm-tray"), "nm-tray about");
        assert_eq!(
            arg("Ikke længere forbundet til %1 '%2'.", "Wi-Fi"),
            "Ikke længere forbundet til Wi-Fi '%2'."
        );
        assert_eq!(arg("%2 og %3", "x"), "x og %3");
        assert_eq!(arg("%1 = %1", "a"), "a = a");
    }

    #[test]
    fn test_arg_without_marker() {
        assert_eq!(arg("Afslut", "x"), "Afslut");
    }

    #[test]
    fn test_arg_chaining() {
        let text = arg(&arg("Nu forbundet til %1 '%2'.", "Wi-Fi"), "home");
        assert_eq!(text, "Nu forbundet til Wi-Fi 'home'.");
    }

    #[test]
    fn test_args_single_pass() {
        assert_eq!(args("%1 '%2'", &["%2", "home"]), "%2 'home'");
        assert_eq!(args("%3 before %1", &["a", "b"]), "b before a");
        assert_eq!(args("%1 %2", &["only"]), "only %2");
    }

    #[test]
    fn test_replace_count() {
        assert_eq!(replace_count("%n aktive forbindelser", 3), "3 aktive forbindelser");
        assert_eq!(replace_count("%Ln enhed(er)", -1), "-1 enhed(er)");
        assert_eq!(replace_count("%1 forbindelser", 3), "%1 forbindelser");
    }

    proptest! {
        #[test]
        fn prop_text_without_percent_is_untouched(text in "[^%]*", value in ".*") {
            prop_assert_eq!(arg(&text, &value), text.clone());
            prop_assert_eq!(args(&text, &[value]), text);
        }

        #[test]
        fn prop_substituted_values_are_not_rescanned(a in "[%0-9a-z]{0,8}", b in "[a-z]{0,8}") {
            let out = args("%1|%2", &[a.as_str(), b.as_str()]);
            prop_assert_eq!(out, format!("{a}|{b}"));
        }

        #[test]
        fn prop_markers_survive_lookup_text(n in 1u8..=99) {
            let template = format!("x %{n} y");
            prop_assert_eq!(markers(&template), BTreeSet::from([n]));
        }
    }
}
