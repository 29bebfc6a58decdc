//! Classification of the digits a caller entered.

use std::fmt;

/// The single key press that registers an opt-out.
pub const OPT_OUT_DIGIT: &str = "1";

/// What the caller did during a collect round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputClassification {
    /// Nothing was entered (timeout or no key press).
    Empty,
    /// Exactly the opt-out digit.
    OptOutCode,
    /// Anything else.
    OtherInput,
}

impl InputClassification {
    /// Classifies the raw collected value.
    ///
    /// The comparison is a literal string match: `"01"` and `"1 "` are
    /// `OtherInput`, not `OptOutCode`.
    pub fn classify(raw_input: Option<&str>) -> Self {
        match raw_input {
            None | Some("") => InputClassification::Empty,
            Some(OPT_OUT_DIGIT) => InputClassification::OptOutCode,
            Some(_) => InputClassification::OtherInput,
        }
    }

    pub fn is_opt_out(&self) -> bool {
        matches!(self, InputClassification::OptOutCode)
    }

    /// Stable lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputClassification::Empty => "empty",
            InputClassification::OptOutCode => "opt_out_code",
            InputClassification::OtherInput => "other_input",
        }
    }
}

impl fmt::Display for InputClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_input_is_empty() {
        assert_eq!(InputClassification::classify(None), InputClassification::Empty);
    }

    #[test]
    fn empty_string_is_empty() {
        assert_eq!(InputClassification::classify(Some("")), InputClassification::Empty);
    }

    #[test]
    fn one_is_opt_out_code() {
        assert_eq!(
            InputClassification::classify(Some("1")),
            InputClassification::OptOutCode
        );
    }

    #[test]
    fn near_misses_are_other_input() {
        for raw in ["01", "1 ", " 1", "11", "1#", "７", "one"] {
            assert_eq!(
                InputClassification::classify(Some(raw)),
                InputClassification::OtherInput,
                "{:?} must not count as an opt-out",
                raw
            );
        }
    }

    proptest! {
        #[test]
        fn any_other_non_empty_value_is_other_input(raw in ".+") {
            prop_assume!(raw != OPT_OUT_DIGIT);
            prop_assert_eq!(
                InputClassification::classify(Some(&raw)),
                InputClassification::OtherInput
            );
        }
    }
}
