//! Human ("natural") ordering of job names, so `py39` sorts before `py311`.

use std::cmp::Ordering;

/// Splits `s` into alternating text and digit runs, always starting with a
/// (possibly empty) text run so runs at the same index have the same kind.
fn runs(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = false;
    for (idx, c) in s.char_indices() {
        if c.is_ascii_digit() != in_digits {
            out.push(&s[start..idx]);
            start = idx;
            in_digits = !in_digits;
        }
    }
    out.push(&s[start..]);
    out
}

fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares text runs lexically and digit runs by numeric value. Names that
/// only differ in leading zeros fall back to plain string order.
pub fn compare_human(a: &str, b: &str) -> Ordering {
    let ra = runs(a);
    let rb = runs(b);
    for (idx, (x, y)) in ra.iter().zip(rb.iter()).enumerate() {
        let ord = if idx % 2 == 1 {
            cmp_numeric(x, y)
        } else {
            x.cmp(y)
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ra.len().cmp(&rb.len()).then_with(|| a.cmp(b))
}

pub fn sort_human<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| compare_human(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_alternate_starting_with_text() {
        assert_eq!(runs("py310-macos"), vec!["py", "310", "-macos"]);
        assert_eq!(runs("38"), vec!["", "38"]);
        assert_eq!(runs("lint"), vec!["lint"]);
        assert_eq!(runs(""), vec![""]);
    }

    #[test]
    fn numeric_runs_compare_by_value() {
        let mut v = vec!["py310", "py38", "py39"];
        sort_human(&mut v);
        assert_eq!(v, vec!["py38", "py39", "py310"]);

        let mut v = vec!["py311", "py310", "py39", "py38"];
        sort_human(&mut v);
        assert_eq!(v, vec!["py38", "py39", "py310", "py311"]);
    }

    #[test]
    fn suffixed_names_follow_their_base() {
        let mut v = vec![
            "py39-macos".to_string(),
            "py310".to_string(),
            "py39".to_string(),
            "lint".to_string(),
            "py38-macos".to_string(),
            "py38".to_string(),
        ];
        sort_human(&mut v);
        assert_eq!(
            v,
            vec!["lint", "py38", "py38-macos", "py39", "py39-macos", "py310"]
        );
    }

    #[test]
    fn leading_zeros_tie_break_deterministically() {
        assert_eq!(compare_human("py08", "py8"), Ordering::Less);
        assert_eq!(compare_human("py8", "py08"), Ordering::Greater);
        assert_eq!(compare_human("py8", "py8"), Ordering::Equal);
    }

    #[test]
    fn huge_numbers_do_not_overflow() {
        assert_eq!(
            compare_human("a99999999999999999999999", "a100000000000000000000000"),
            Ordering::Less
        );
    }
}
