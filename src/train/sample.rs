use crate::data::label::ExpectedLabel;
use crate::data::pattern::Pattern;

/// One labelled training example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub pattern: Pattern,
    pub expected: ExpectedLabel,
}

impl Sample {
    pub fn new(pattern: Pattern, expected: ExpectedLabel) -> Sample {
        Sample { pattern, expected }
    }
}
