//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Visible width, ignoring ANSI escapes and counting wide (CJK) characters
/// as two columns.
pub fn display_width(s: &str) -> usize {
    let mut plain = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else if c == '\x1b' {
            in_escape = true;
        } else {
            plain.push(c);
        }
    }
    UnicodeWidthStr::width(plain.as_str())
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(pad))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(pad), s)
}

/// Kilometres with thousands separator, optional sign.
///
/// `km2readable(12500, false)` → `12,500 km`,
/// `km2readable(-80, true)` → `-80 km`, `km2readable(80, true)` → `+80 km`
pub fn km2readable(km: i64, want_sign: bool) -> String {
    let digits = km.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if km < 0 {
        "-"
    } else if km > 0 && want_sign {
        "+"
    } else {
        ""
    };

    format!("{sign}{grouped} km")
}
