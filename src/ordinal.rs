/// English ordinal suffix for `n`; 11, 12 and 13 (mod 100) take "th".
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    }
}

/// "1st Prize", "2nd Prize", ...
pub fn prize_label(n: u32) -> String {
    format!("{n}{} Prize", ordinal_suffix(n))
}
