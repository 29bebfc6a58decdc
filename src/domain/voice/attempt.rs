//! Attempt tracking for the collect webhook.
//!
//! No call state is stored server-side. The platform echoes the attempt
//! number back through the `attempt` query parameter of the callback URL
//! that the previous response handed out.

use std::fmt;

/// Name of the query parameter carrying the attempt number.
pub const ATTEMPT_QUERY_PARAM: &str = "attempt";

/// Which round of digit collection a webhook belongs to.
///
/// Always at least 1. Any value of 2 or more is the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attempt(u32);

impl Attempt {
    /// The attempt every call starts with.
    pub const FIRST: Attempt = Attempt(1);

    /// Creates an attempt, clamping zero up to the first attempt.
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Derives the attempt from the raw `attempt` query value.
    ///
    /// Only the leading integer counts, so `2abc` and `2.5` are attempt 2.
    /// Missing, empty, non-numeric, zero or negative values degrade to
    /// [`Attempt::FIRST`]; values too large for `u32` saturate. This never
    /// fails.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(leading_integer)
            .filter(|value| *value >= 1)
            .map(Attempt)
            .unwrap_or(Self::FIRST)
    }

    /// The numeric value.
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_first(&self) -> bool {
        self.0 == 1
    }

    /// True from the second attempt on; invalid input then ends the call.
    pub fn is_final(&self) -> bool {
        self.0 >= 2
    }

    /// The attempt the next collect callback should carry.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Leading unsigned integer after optional whitespace and a `+` sign.
///
/// `None` when there are no digits or the number is negative.
fn leading_integer(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = match trimmed.as_bytes().first() {
        Some(b'-') => return None,
        Some(b'+') => &trimmed[1..],
        _ => trimmed,
    };
    let digits = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|digit| u32::from(digit - b'0'));

    let mut value: Option<u32> = None;
    for digit in digits {
        value = Some(
            value
                .unwrap_or(0)
                .saturating_mul(10)
                .saturating_add(digit),
        );
    }
    value
}

impl Default for Attempt {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
