use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::{PerceptronError, Result};

/// The five vowel classes, in network index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLabel {
    A,
    E,
    I,
    O,
    U,
}

impl ClassLabel {
    pub const ALL: [ClassLabel; 5] = [
        ClassLabel::A,
        ClassLabel::E,
        ClassLabel::I,
        ClassLabel::O,
        ClassLabel::U,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Perceptron index that specializes in this class.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ClassLabel> {
        Self::ALL.get(index).copied()
    }

    pub fn letter(self) -> char {
        match self {
            ClassLabel::A => 'a',
            ClassLabel::E => 'e',
            ClassLabel::I => 'i',
            ClassLabel::O => 'o',
            ClassLabel::U => 'u',
        }
    }

    /// One-hot training target for this class.
    pub fn one_hot(self) -> ExpectedLabel {
        let mut bits = vec![0; Self::COUNT];
        bits[self.index()] = 1;
        ExpectedLabel(bits)
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A one-hot target vector: exactly one bit is 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>")]
pub struct ExpectedLabel(Vec<u8>);

impl ExpectedLabel {
    pub fn new(bits: Vec<u8>) -> Result<ExpectedLabel> {
        if bits.iter().any(|&b| b > 1) {
            return Err(PerceptronError::InvalidLabel(format!("{:?} is not binary", bits)));
        }
        let ones = bits.iter().filter(|&&b| b == 1).count();
        if ones != 1 {
            return Err(PerceptronError::InvalidLabel(format!(
                "{:?} has {} set bits, expected exactly one", bits, ones
            )));
        }
        Ok(ExpectedLabel(bits))
    }

    /// One-hot vector of length `len` with the bit at `index` set.
    pub fn one_hot(index: usize, len: usize) -> Result<ExpectedLabel> {
        if index >= len {
            return Err(PerceptronError::InvalidLabel(format!(
                "class index {} >= class count {}", index, len
            )));
        }
        let mut bits = vec![0; len];
        bits[index] = 1;
        Ok(ExpectedLabel(bits))
    }

    pub fn bits(&self) -> &[u8] {
        &self.0
    }

    pub fn bit(&self, index: usize) -> u8 {
        self.0[index]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of the set bit. Always `Some` for a label built through `new`,
    /// `one_hot` or deserialization.
    pub fn class_index(&self) -> Option<usize> {
        self.0.iter().position(|&b| b == 1)
    }
}

impl TryFrom<Vec<u8>> for ExpectedLabel {
    type Error = PerceptronError;

    fn try_from(bits: Vec<u8>) -> Result<ExpectedLabel> {
        ExpectedLabel::new(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_encoding_per_class() {
        assert_eq!(ClassLabel::A.one_hot().bits(), &[1, 0, 0, 0, 0]);
        assert_eq!(ClassLabel::O.one_hot().bits(), &[0, 0, 0, 1, 0]);
        for label in ClassLabel::ALL {
            assert_eq!(label.one_hot().class_index(), Some(label.index()));
            assert_eq!(ClassLabel::from_index(label.index()), Some(label));
        }
        assert_eq!(ClassLabel::from_index(5), None);
    }

    #[test]
    fn test_expected_label_validation() {
        assert!(ExpectedLabel::new(vec![0, 1, 0]).is_ok());
        assert!(ExpectedLabel::new(vec![0, 0, 0]).is_err());
        assert!(ExpectedLabel::new(vec![1, 1, 0]).is_err());
        assert!(ExpectedLabel::new(vec![0, 2, 0]).is_err());
        assert!(ExpectedLabel::one_hot(3, 3).is_err());
        assert_eq!(ExpectedLabel::one_hot(2, 3).unwrap().bits(), &[0, 0, 1]);
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let label: ExpectedLabel = serde_json::from_str("[0,0,1,0,0]").unwrap();
        assert_eq!(label.class_index(), Some(2));
        for json in ["[0,0,0,0,0]", "[1,1,0,0,0]", "[0,2,0,0,0]"] {
            assert!(serde_json::from_str::<ExpectedLabel>(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ClassLabel::U.to_string(), "u");
    }
}
