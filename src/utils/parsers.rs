//! Text parsing utilities for artist credits

/// Separator between the main artist and featured artists in a credit string
pub const CREDIT_SEPARATOR: char = ',';

/// Main artist of a credit string: everything before the first comma.
///
/// Case and whitespace are preserved, so `"Pitbull, Ne-Yo"` yields
/// `"Pitbull"` and `" Pitbull"` stays `" Pitbull"`.
pub fn main_artist(credit: &str) -> &str {
    credit
        .split(CREDIT_SEPARATOR)
        .next()
        .unwrap_or_default()
}
