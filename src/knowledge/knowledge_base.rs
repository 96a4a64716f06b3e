//! Durable form of every perceptron's trained parameters.
//!
//! Text layout, one block per perceptron in class order:
//!
//! ```text
//! w00 w01 ... w0c      <- `rows` lines of `cols` floats
//! ...
//! bias                 <- one float
//!                      <- blank separator
//! ```
//!
//! Floats are written with Rust's shortest round-trip formatting, so a
//! save/load cycle reproduces every weight bit-for-bit.

use std::io::Write;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::data::dataset::{split_blocks, Block};
use crate::error::{PerceptronError, Result};
use crate::math::matrix::Matrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptronSnapshot {
    pub weights: Matrix,
    pub bias: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub entries: Vec<PerceptronSnapshot>,
}

impl KnowledgeBase {
    /// Checks block count, weight shapes and finiteness against a network layout.
    pub fn validate(&self, rows: usize, cols: usize, classes: usize) -> Result<()> {
        if self.entries.len() != classes {
            return Err(corrupt(format!(
                "expected {} perceptron blocks, found {}", classes, self.entries.len()
            )));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            let shape = entry.weights.shape();
            let ragged = entry.weights.data.len() != shape.0
                || entry.weights.data.iter().any(|row| row.len() != shape.1);
            if shape != (rows, cols) || ragged {
                return Err(corrupt(format!(
                    "block {}: weights are {}x{}, expected {}x{}", i, shape.0, shape.1, rows, cols
                )));
            }
            let finite = entry.bias.is_finite()
                && entry.weights.data.iter().flatten().all(|w| w.is_finite());
            if !finite {
                return Err(corrupt(format!("block {}: non-finite parameter", i)));
            }
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            for row in &entry.weights.data {
                let cells: Vec<String> = row.iter().map(|w| w.to_string()).collect();
                out.push_str(&cells.join(" "));
                out.push('\n');
            }
            out.push_str(&entry.bias.to_string());
            out.push_str("\n\n");
        }
        out
    }

    /// Parses the text layout, requiring exactly `classes` blocks of the given shape.
    pub fn parse_text(text: &str, rows: usize, cols: usize, classes: usize) -> Result<KnowledgeBase> {
        let blocks = split_blocks(text);
        if blocks.len() != classes {
            return Err(corrupt(format!(
                "expected {} perceptron blocks, found {}", classes, blocks.len()
            )));
        }
        let entries = blocks.iter()
            .enumerate()
            .map(|(i, block)| parse_block(i, block, rows, cols))
            .collect::<Result<Vec<_>>>()?;
        let kb = KnowledgeBase { entries };
        kb.validate(rows, cols, classes)?;
        Ok(kb)
    }

    pub fn save_text(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(self.to_text().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn load_text(path: &Path, rows: usize, cols: usize, classes: usize) -> Result<KnowledgeBase> {
        let text = std::fs::read_to_string(path)?;
        KnowledgeBase::parse_text(&text, rows, cols, classes)
    }

    /// Serializes the snapshot to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a snapshot written by `save_json`. Shape checks happen at import.
    pub fn load_json(path: &Path) -> Result<KnowledgeBase> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn parse_block(index: usize, block: &Block<'_>, rows: usize, cols: usize) -> Result<PerceptronSnapshot> {
    if block.lines.len() != rows + 1 {
        return Err(corrupt(format!(
            "block {} (line {}): expected {} weight rows and a bias, found {} lines",
            index, block.first_line, rows, block.lines.len()
        )));
    }

    let mut data = Vec::with_capacity(rows);
    for (offset, line) in block.lines[..rows].iter().enumerate() {
        let line_no = block.first_line + offset;
        let row = line.split_whitespace()
            .map(|token| parse_float(token, line_no))
            .collect::<Result<Vec<f64>>>()?;
        if row.len() != cols {
            return Err(corrupt(format!(
                "line {}: expected {} weights, found {}", line_no, cols, row.len()
            )));
        }
        data.push(row);
    }

    let bias_line = block.lines[rows];
    let bias_line_no = block.first_line + rows;
    let tokens: Vec<&str> = bias_line.split_whitespace().collect();
    if tokens.len() != 1 {
        return Err(corrupt(format!(
            "line {}: expected a single bias value, found {} tokens", bias_line_no, tokens.len()
        )));
    }
    let bias = parse_float(tokens[0], bias_line_no)?;

    Ok(PerceptronSnapshot { weights: Matrix { rows, cols, data }, bias })
}

fn parse_float(token: &str, line_no: usize) -> Result<f64> {
    token.parse::<f64>()
        .map_err(|_| corrupt(format!("line {}: '{}' is not a number", line_no, token)))
}

fn corrupt(message: String) -> PerceptronError {
    PerceptronError::CorruptKnowledgeBase(message)
}
