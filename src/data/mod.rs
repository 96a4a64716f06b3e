pub mod pattern;
pub mod label;
pub mod dataset;
pub mod image;
pub mod glyphs;

pub use pattern::Pattern;
pub use label::{ClassLabel, ExpectedLabel};
pub use dataset::{PatternSet, parse_pattern_set, load_pattern_set, load_training_set, class_file_name};
pub use self::image::{image_bytes_to_pattern, load_image_pattern, DEFAULT_INK_CUTOFF};
pub use glyphs::{builtin_vowels, glyph};
