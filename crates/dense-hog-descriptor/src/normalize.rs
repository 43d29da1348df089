//! The four per-block normalizations.
//!
//! Every block expands to four equally long variants, always written in
//! [`BlockNorm::ALL`] order. Descriptors are only comparable with each other
//! (and with reference fixtures) if that order is preserved.

use crate::HogParams;
use dense_hog_core::{normalize_l1_in_place, Histogram};
use serde::{Deserialize, Serialize};

/// Ceiling applied by [`BlockNorm::L2Clip`] before renormalizing.
pub const L2_CLIP_MAX: f64 = 0.2;

/// One block normalization scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockNorm {
    /// Block divided by its area in cells. Cells are already unit-L2, so
    /// this is the block's L2 normalization without recomputing the norm.
    L2,
    /// L2 clipped at [`L2_CLIP_MAX`], then divided by the square root of the
    /// sum of the clipped values. An all-zero block stays all zero.
    L2Clip,
    /// Block divided by its component sum; an all-zero block stays all zero.
    L1,
    /// Component-wise square root of [`BlockNorm::L1`].
    L1Sqrt,
}

impl BlockNorm {
    /// Output order within one block.
    pub const ALL: [BlockNorm; 4] = [
        BlockNorm::L2,
        BlockNorm::L2Clip,
        BlockNorm::L1,
        BlockNorm::L1Sqrt,
    ];

    pub const COUNT: usize = 4;

    /// Position of this variant within a normalized block.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            BlockNorm::L2 => 0,
            BlockNorm::L2Clip => 1,
            BlockNorm::L1 => 2,
            BlockNorm::L1Sqrt => 3,
        }
    }
}

/// Write the four normalized variants of `block` into `out`.
///
/// `area` is the block size in cells; `out.len()` must be
/// `BlockNorm::COUNT * block.len()`.
pub fn normalize_block_into(block: &[f64], area: f64, out: &mut [f64]) {
    let n = block.len();
    assert_eq!(out.len(), BlockNorm::COUNT * n, "output buffer length");

    let (l2, rest) = out.split_at_mut(n);
    let (l2_clip, rest) = rest.split_at_mut(n);
    let (l1, l1_sqrt) = rest.split_at_mut(n);

    for (dst, &v) in l2.iter_mut().zip(block) {
        *dst = v / area;
    }

    let mut clipped_sum = 0.0;
    for (dst, &v) in l2_clip.iter_mut().zip(l2.iter()) {
        *dst = if v > L2_CLIP_MAX { L2_CLIP_MAX } else { v };
        clipped_sum += *dst;
    }
    if clipped_sum != 0.0 {
        let divisor = clipped_sum.sqrt();
        for v in l2_clip.iter_mut() {
            *v /= divisor;
        }
    }

    l1.copy_from_slice(block);
    normalize_l1_in_place(l1);

    for (dst, &v) in l1_sqrt.iter_mut().zip(l1.iter()) {
        *dst = v.sqrt();
    }
}

/// The four variants of `block` as separate histograms, in [`BlockNorm::ALL`] order.
pub fn normalize_block(block: &[f64], params: &HogParams) -> [Histogram; 4] {
    let n = block.len();
    let mut out = vec![0.0; BlockNorm::COUNT * n];
    normalize_block_into(block, params.cells_per_block() as f64, &mut out);
    let variant = |norm: BlockNorm| {
        let start = norm.index() * n;
        Histogram::new(out[start..start + n].to_vec())
    };
    BlockNorm::ALL.map(variant)
}
