//! Dot-mask lookup tables
//!
//! Every possible arrangement of dots inside a 16-byte window is enumerated
//! once. Masks describing four fields of 1-3 characters each get a dense id
//! and a shuffle pattern; everything else maps to -1.
//!
//! A mask includes the sentinel bit at the input length, so a valid mask has
//! exactly four set bits: three real dots plus the terminator.
//!
//! Shuffle pattern lane layout for field `c` (weights in brackets):
//!
//! ```text
//! lane 2c      units     [1]
//! lane 2c + 1  tens      [10]
//! lane 8 + 2c  hundreds  [100]
//! lane 9 + 2c  hundreds  [0]
//! ```
//!
//! Unused lanes hold [`PAD`], which `pshufb`/`tbl` turn into a zero byte.

use std::sync::OnceLock;

/// Width of the input window in bytes
pub const WINDOW_WIDTH: usize = 16;

/// Number of dot-delimited fields in an address
pub const FIELD_COUNT: usize = 4;

/// Longest decimal field accepted by the layout
pub const MAX_FIELD_LEN: usize = 3;

/// Number of valid dot masks (3 possible lengths for each of 4 fields)
pub const MAX_PATTERNS: usize = 81;

/// Number of distinct 16-bit dot masks
pub const MASK_SPACE: usize = 1 << WINDOW_WIDTH;

/// Shuffle index that zeroes the output lane
pub const PAD: i8 = -1;

/// Positional weight applied to each shuffled lane by the multiply-add step
pub const WEIGHTS: [i8; WINDOW_WIDTH] = [1, 10, 1, 10, 1, 10, 1, 10, 100, 0, 100, 0, 100, 0, 100, 0];

/// Byte-shuffle template for one valid dot mask
pub type ShufflePattern = [i8; WINDOW_WIDTH];

static TABLES: OnceLock<DotmaskTables> = OnceLock::new();

/// Shared tables, generated on first use
pub fn tables() -> &'static DotmaskTables {
    TABLES.get_or_init(DotmaskTables::generate)
}

/// Mask-to-id mapping plus the shuffle pattern for every id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotmaskTables {
    mask_to_id: Vec<i8>,
    patterns: Vec<ShufflePattern>,
}

impl DotmaskTables {
    /// Enumerate all 65536 masks.
    ///
    /// Ids are handed out in ascending mask order, so the result is the same
    /// on every run.
    pub fn generate() -> Self {
        let mut mask_to_id = vec![-1i8; MASK_SPACE];
        let mut patterns = Vec::with_capacity(MAX_PATTERNS);

        for mask in 0..=u16::MAX {
            if let Some(pattern) = shuffle_pattern(mask) {
                mask_to_id[mask as usize] = patterns.len() as i8;
                patterns.push(pattern);
            }
        }

        debug_assert_eq!(patterns.len(), MAX_PATTERNS);

        DotmaskTables {
            mask_to_id,
            patterns,
        }
    }

    /// Stored entry for `mask`: the id, or -1 if the mask is invalid
    #[inline(always)]
    pub fn raw_id(&self, mask: u16) -> i8 {
        self.mask_to_id[mask as usize]
    }

    #[inline(always)]
    pub fn id_for(&self, mask: u16) -> Option<u8> {
        let id = self.raw_id(mask);
        if id < 0 { None } else { Some(id as u8) }
    }

    /// Shuffle pattern for a valid id.
    ///
    /// # Panics
    /// If `id` was not produced by [`DotmaskTables::id_for`].
    #[inline(always)]
    pub fn pattern(&self, id: u8) -> &ShufflePattern {
        &self.patterns[id as usize]
    }

    /// Number of valid ids
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Valid masks in id order
    pub fn masks(&self) -> impl Iterator<Item = u16> + '_ {
        self.mask_to_id
            .iter()
            .enumerate()
            .filter(|(_, id)| **id >= 0)
            .map(|(mask, _)| mask as u16)
    }
}

/// Character count of each field described by `mask`.
///
/// Returns `None` unless the mask has exactly four set bits and every field
/// is 1-3 characters long.
pub fn field_lengths(mask: u16) -> Option<[u8; FIELD_COUNT]> {
    if mask.count_ones() as usize != FIELD_COUNT {
        return None;
    }

    let mut lengths = [0u8; FIELD_COUNT];
    let mut remaining = mask;
    let mut previous_dot: i32 = -1;

    for length in lengths.iter_mut() {
        let dot_pos = remaining.trailing_zeros() as i32;
        let field_len = dot_pos - previous_dot - 1;
        if field_len < 1 || field_len > MAX_FIELD_LEN as i32 {
            return None;
        }
        *length = field_len as u8;
        previous_dot = dot_pos;
        remaining &= remaining - 1;
    }

    Some(lengths)
}

/// Build the shuffle pattern for one mask, or `None` if the mask is invalid.
pub fn shuffle_pattern(mask: u16) -> Option<ShufflePattern> {
    let lengths = field_lengths(mask)?;
    let mut pattern = [PAD; WINDOW_WIDTH];
    let mut start = 0usize;

    for (field, &len) in lengths.iter().enumerate() {
        let lo = field * 2;
        let hi = 8 + field * 2;
        // Digits are addressed from the right so the units digit always lands
        // in the weight-1 lane.
        let last = (start + len as usize - 1) as i8;

        pattern[lo] = last;
        if len >= 2 {
            pattern[lo + 1] = last - 1;
        }
        if len == 3 {
            pattern[hi] = last - 2;
            pattern[hi + 1] = last - 2;
        }

        start += len as usize + 1;
    }

    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_for(lengths: [usize; 4]) -> u16 {
        let mut mask = 0u16;
        let mut pos = 0;
        for len in lengths {
            pos += len;
            mask |= 1 << pos;
            pos += 1;
        }
        mask
    }

    #[test]
    fn test_valid_mask_count() {
        let tables = DotmaskTables::generate();
        assert_eq!(tables.len(), MAX_PATTERNS);
        assert_eq!(tables.masks().count(), MAX_PATTERNS);
    }

    #[test]
    fn test_ids_dense_and_ascending() {
        let tables = DotmaskTables::generate();
        for (expected, mask) in tables.masks().enumerate() {
            assert_eq!(tables.id_for(mask), Some(expected as u8));
        }
    }

    #[test]
    fn test_valid_masks_have_four_bits() {
        let tables = DotmaskTables::generate();
        for mask in tables.masks() {
            assert_eq!(mask.count_ones(), 4, "mask {:016b}", mask);
        }
    }

    #[test]
    fn test_pattern_lanes_in_range() {
        let tables = DotmaskTables::generate();
        for id in 0..tables.len() as u8 {
            for &lane in tables.pattern(id) {
                assert!(lane == PAD || (0..WINDOW_WIDTH as i8).contains(&lane));
            }
        }
    }

    #[test]
    fn test_wrong_dot_count_rejected() {
        // "1.2.3" + sentinel: three bits
        assert_eq!(field_lengths(0b10_1010), None);
        // "1.2.3.4.5" + sentinel: five bits
        assert_eq!(field_lengths(0b10_1010_1010), None);
        assert_eq!(field_lengths(0), None);
        assert_eq!(field_lengths(u16::MAX), None);
    }

    #[test]
    fn test_empty_field_rejected() {
        // "1..2.3" + sentinel at 6
        assert_eq!(field_lengths(0b101_0110), None);
        // leading dot: ".1.2.3" + sentinel at 6
        assert_eq!(field_lengths(0b101_0101), None);
    }

    #[test]
    fn test_long_field_rejected() {
        // "1234.1.1.1" + sentinel
        assert_eq!(field_lengths(mask_for([4, 1, 1, 1])), None);
        assert_eq!(field_lengths(mask_for([1, 1, 1, 4])), None);
    }

    #[test]
    fn test_field_lengths() {
        assert_eq!(field_lengths(mask_for([3, 3, 1, 1])), Some([3, 3, 1, 1]));
        assert_eq!(field_lengths(mask_for([1, 2, 3, 2])), Some([1, 2, 3, 2]));
    }

    #[test]
    fn test_pattern_single_digits() {
        // "1.2.3.4"
        let pattern = shuffle_pattern(mask_for([1, 1, 1, 1])).unwrap();
        assert_eq!(
            pattern,
            [0, PAD, 2, PAD, 4, PAD, 6, PAD, PAD, PAD, PAD, PAD, PAD, PAD, PAD, PAD]
        );
    }

    #[test]
    fn test_pattern_mixed_lengths() {
        // "192.168.1.10"
        let pattern = shuffle_pattern(mask_for([3, 3, 1, 2])).unwrap();
        assert_eq!(
            pattern,
            [2, 1, 6, 5, 8, PAD, 11, 10, 0, 0, 4, 4, PAD, PAD, PAD, PAD]
        );
    }

    #[test]
    fn test_two_digit_fields_leave_high_half_empty() {
        let pattern = shuffle_pattern(mask_for([2, 2, 2, 2])).unwrap();
        assert!(pattern[8..].iter().all(|&lane| lane == PAD));
    }

    #[test]
    fn test_shared_tables_initialized_once() {
        let first = tables() as *const DotmaskTables;
        let second = tables() as *const DotmaskTables;
        assert_eq!(first, second);
        assert_eq!(tables().len(), MAX_PATTERNS);
    }

    #[test]
    fn test_weights_fit_multiply_add() {
        // 9*1 + 9*10 and 9*100 must stay below i16::MAX
        let worst: i32 = WEIGHTS.iter().map(|&w| 9 * w as i32).sum();
        assert!(worst < i16::MAX as i32);
    }
}
