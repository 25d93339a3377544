//! Input helpers shared by the client and the CLI.

use std::sync::OnceLock;

use regex::Regex;

/// Longest user input accepted after sanitizing.
pub const MAX_INPUT_LEN: usize = 1000;

/// Trim, strip angle brackets and cap at [`MAX_INPUT_LEN`] characters.
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .take(MAX_INPUT_LEN)
        .collect()
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
        .is_match(email)
}
