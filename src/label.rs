//! LabelAssigner: deterministic labels and color slots for chunks.
//!
//! Both derivations are pure functions of the chunk id, so the same id
//! receives the same label and color within a pass and across repeated
//! calls, independent of the order chunks were processed.

use crate::chunk::ordinal;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A fixed palette of renderer-opaque color strings.
///
/// The engine only uses the palette's length for slot assignment; the
/// strings ride along for downstream renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Create a palette. Rejects an empty color list, which would make slot
    /// assignment (a modulo) undefined.
    pub fn new(colors: Vec<String>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self(colors))
    }

    /// Number of color slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A palette is never empty; this exists for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The color strings.
    #[must_use]
    pub fn colors(&self) -> &[String] {
        &self.0
    }

    /// Color string at a slot.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl Default for Palette {
    /// Eight distinguishable colors.
    fn default() -> Self {
        Self(
            [
                "#e6194b", "#3cb44b", "#f58231", "#4363d8", "#911eb4", "#46f0f0", "#f032e6",
                "#bcf60c",
            ]
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
        )
    }
}

/// Color slot for a chunk id.
///
/// An id with a parseable trailing ordinal `n` maps to `((n % P) + P) % P`
/// where `P` is the palette length; the double modulo guards negative
/// ordinals. Ids without an ordinal fall back to a stable string hash
/// modulo `P`.
#[must_use]
pub fn color_for(chunk_id: &str, palette: &Palette) -> usize {
    let p = palette.len() as i64;
    match ordinal(chunk_id) {
        Some(n) => (((n % p) + p) % p) as usize,
        None => (stable_hash(chunk_id) % p as u64) as usize,
    }
}

/// Visible label for a chunk's start marker: the ordinal suffix as a
/// string, or the full id when no ordinal parses.
#[must_use]
pub fn start_label(chunk_id: &str) -> String {
    match ordinal(chunk_id) {
        Some(n) => n.to_string(),
        None => chunk_id.to_string(),
    }
}

/// Visible label for a chunk's end marker: the start label with a
/// distinguishing suffix.
#[must_use]
pub fn end_label(chunk_id: &str) -> String {
    format!("{}/", start_label(chunk_id))
}

// DefaultHasher is zero-keyed SipHash: deterministic within and across
// processes for the same id, unlike HashMap's RandomState.
fn stable_hash(s: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    s.hash(&mut hasher);
    hasher.finish()
}
