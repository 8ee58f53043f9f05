//! Frame properties
//!
//! Every frame carries a mutable key/value map. The host pipeline copies
//! the map from the template frame when a filter allocates its output, and
//! filters overwrite the keys their transform invalidates. The only key
//! the equalization filters touch is the color-range tag: equalization
//! redistributes intensities across the whole sample range, so a
//! limited-range tag on the input would be stale on the output.

use std::collections::HashMap;

/// Property key carrying the [`ColorRange`] tag.
pub const COLOR_RANGE_KEY: &str = "_ColorRange";

/// Nominal sample range of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ColorRange {
    /// Samples span the full `[0, 2^bits - 1]` range.
    Full = 0,
    /// Samples span the narrower studio swing (e.g. 16..235 for 8-bit luma).
    Limited = 1,
}

impl ColorRange {
    /// Decode a property value; unknown values map to `None`.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(ColorRange::Full),
            1 => Some(ColorRange::Limited),
            _ => None,
        }
    }
}

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Signed integer datum.
    Int(i64),
    /// Floating-point datum.
    Float(f64),
}

/// Mutable key/value map attached to each frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameProps {
    entries: HashMap<String, PropValue>,
}

impl FrameProps {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an integer property, replacing any previous value under the key.
    pub fn set_int(&mut self, key: &str, value: i64) {
        self.entries.insert(key.to_string(), PropValue::Int(value));
    }

    /// Get an integer property.
    ///
    /// Returns `None` if the key is absent or holds a non-integer value.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(PropValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Set a float property, replacing any previous value under the key.
    pub fn set_float(&mut self, key: &str, value: f64) {
        self.entries.insert(key.to_string(), PropValue::Float(value));
    }

    /// Get a float property.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(PropValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.entries.remove(key)
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read the color-range tag, if present and recognized.
    pub fn color_range(&self) -> Option<ColorRange> {
        self.get_int(COLOR_RANGE_KEY).and_then(ColorRange::from_i64)
    }

    /// Write the color-range tag, replacing any previous value.
    pub fn set_color_range(&mut self, range: ColorRange) {
        self.set_int(COLOR_RANGE_KEY, range as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_round_trip() {
        let mut props = FrameProps::new();
        assert!(props.is_empty());

        props.set_int("_SceneChange", 1);
        assert_eq!(props.get_int("_SceneChange"), Some(1));
        assert_eq!(props.len(), 1);

        props.set_int("_SceneChange", 0);
        assert_eq!(props.get_int("_SceneChange"), Some(0));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_type_mismatch_reads_none() {
        let mut props = FrameProps::new();
        props.set_float("_Gamma", 2.2);
        assert_eq!(props.get_int("_Gamma"), None);
        assert_eq!(props.get_float("_Gamma"), Some(2.2));
    }

    #[test]
    fn test_color_range_replacement() {
        let mut props = FrameProps::new();
        assert_eq!(props.color_range(), None);

        props.set_color_range(ColorRange::Limited);
        assert_eq!(props.color_range(), Some(ColorRange::Limited));
        assert_eq!(props.get_int(COLOR_RANGE_KEY), Some(1));

        props.set_color_range(ColorRange::Full);
        assert_eq!(props.color_range(), Some(ColorRange::Full));
        assert_eq!(props.get_int(COLOR_RANGE_KEY), Some(0));
    }

    #[test]
    fn test_unknown_color_range_value() {
        let mut props = FrameProps::new();
        props.set_int(COLOR_RANGE_KEY, 7);
        assert_eq!(props.color_range(), None);
    }
}
