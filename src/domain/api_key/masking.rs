//! Display masking for key values

use std::collections::HashSet;

use super::entity::ApiKeyId;

/// Filler symbol used in masked keys
pub const MASK_CHAR: char = '*';

/// Number of filler symbols in a masked key
pub const MASK_LENGTH: usize = 24;

const VISIBLE_HEAD: usize = 8;
const VISIBLE_TAIL: usize = 4;

/// Derive the display string for a key.
///
/// Hidden keys show the first 8 and last 4 characters around exactly 24
/// mask symbols, whatever the true length. Shorter inputs keep the same
/// slicing, so head and tail may overlap.
pub fn mask(key: &str, visible: bool) -> String {
    if visible {
        return key.to_string();
    }

    let chars: Vec<char> = key.chars().collect();
    let head = &chars[..VISIBLE_HEAD.min(chars.len())];
    let tail = &chars[chars.len().saturating_sub(VISIBLE_TAIL)..];

    let mut masked = String::with_capacity(VISIBLE_HEAD + MASK_LENGTH + VISIBLE_TAIL);
    masked.extend(head);
    masked.extend(std::iter::repeat_n(MASK_CHAR, MASK_LENGTH));
    masked.extend(tail);
    masked
}

/// Ids whose keys are currently shown unmasked
#[derive(Debug, Clone, Default)]
pub struct VisibleKeys {
    ids: HashSet<ApiKeyId>,
}

impl VisibleKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip visibility for an id, returning the new state
    pub fn toggle(&mut self, id: &ApiKeyId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn is_visible(&self, id: &ApiKeyId) -> bool {
        self.ids.contains(id)
    }

    /// Forget an id, e.g. after its record was deleted
    pub fn forget(&mut self, id: &ApiKeyId) {
        self.ids.remove(id);
    }

    /// Display string for a key under this visibility set
    pub fn display(&self, id: &ApiKeyId, key: &str) -> String {
        mask(key, self.is_visible(id))
    }
}
