//! Line collapsing - slide and merge one row toward index 0
//!
//! Rules:
//! 1. Empty cells are squeezed out, keeping tile order.
//! 2. Scanning from the front, a tile equal to its successor merges with it
//!    into one tile of double value. The doubled value is added to the score.
//! 3. A tile produced by a merge never merges again in the same pass, so
//!    `[2, 2, 2, 2]` becomes `[4, 4]`, not `[8]`, and `[2, 2, 2]` becomes `[4, 2]`.
//! 4. The line is padded back to its length with empty cells.

/// Slide and merge `line` in place, returning the score gained.
///
/// Zero-allocation; works for any line length.
pub fn slide_in_place(line: &mut [u64]) -> u64 {
    // Compact.
    let mut len = 0;
    for i in 0..line.len() {
        if line[i] != 0 {
            line[len] = line[i];
            len += 1;
        }
    }

    // Merge. `out <= read` holds throughout, so writes never clobber unread tiles.
    let mut score = 0u64;
    let mut out = 0;
    let mut read = 0;
    while read < len {
        let value = line[read];
        if read + 1 < len && line[read + 1] == value {
            // Boards hold tiles at most MAX_TILE, so doubling fits in u64.
            let merged = value * 2;
            line[out] = merged;
            score += merged;
            read += 2;
        } else {
            line[out] = value;
            read += 1;
        }
        out += 1;
    }

    for cell in &mut line[out..] {
        *cell = 0;
    }
    score
}

/// Slide and merge a copy of `line`.
///
/// # Examples
///
/// ```
/// use slabs_core::line::slide;
///
/// assert_eq!(slide(&[0, 2, 0, 2]), (vec![4, 0, 0, 0], 4));
/// assert_eq!(slide(&[2, 2, 2, 2]), (vec![4, 4, 0, 0], 8));
/// assert_eq!(slide(&[2, 2, 2, 0]), (vec![4, 2, 0, 0], 4));
/// ```
pub fn slide(line: &[u64]) -> (Vec<u64>, u64) {
    let mut out = line.to_vec();
    let score = slide_in_place(&mut out);
    (out, score)
}
