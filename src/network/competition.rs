use std::fmt;

use serde::{Serialize, Deserialize};

use crate::data::label::ClassLabel;
use crate::error::{PerceptronError, Result};

/// Winner-take-all output: at most one bit set, all-zero means "no match".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>")]
pub struct Decision(Vec<u8>);

impl Decision {
    pub fn none(len: usize) -> Decision {
        Decision(vec![0; len])
    }

    pub fn winner(&self) -> Option<usize> {
        self.0.iter().position(|&b| b == 1)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Decoded vowel, if a winner exists and maps to one.
    pub fn label(&self) -> Option<ClassLabel> {
        self.winner().and_then(ClassLabel::from_index)
    }

    /// Human-readable verdict for console output.
    pub fn describe(&self) -> String {
        match self.label() {
            Some(label) => format!("This is the vowel {}.", label),
            None => "Unrecognized letter.".to_string(),
        }
    }
}

impl TryFrom<Vec<u8>> for Decision {
    type Error = PerceptronError;

    fn try_from(bits: Vec<u8>) -> Result<Decision> {
        if bits.iter().any(|&b| b > 1) {
            return Err(PerceptronError::InvalidLabel(format!("{:?} is not binary", bits)));
        }
        if bits.iter().filter(|&&b| b == 1).count() > 1 {
            return Err(PerceptronError::InvalidLabel(format!("{:?} has more than one winner", bits)));
        }
        Ok(Decision(bits))
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<String> = self.0.iter().map(|b| b.to_string()).collect();
        write!(f, "{}", bits.join(" "))
    }
}

/// Picks the index of the greatest activation strictly above `threshold`.
///
/// Scans left to right against a running maximum seeded with `threshold`, so
/// on ties the earliest index wins.
pub fn compete(activations: &[f64], threshold: f64) -> Decision {
    let mut best = threshold;
    let mut winner = None;
    for (i, &a) in activations.iter().enumerate() {
        if a > best {
            best = a;
            winner = Some(i);
        }
    }

    let mut decision = Decision::none(activations.len());
    if let Some(i) = winner {
        decision.0[i] = 1;
    }
    decision
}
