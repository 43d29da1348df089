//! Sequential / `rayon` switch for the per-cell and per-block loops.
//!
//! Every chunk is written by exactly one closure call and chunks never
//! overlap, so the parallel and sequential paths produce identical output.

/// `Sync` when the `rayon` feature is enabled, no bound otherwise.
#[cfg(feature = "rayon")]
pub trait MaybeSync: Sync {}
#[cfg(feature = "rayon")]
impl<T: Sync + ?Sized> MaybeSync for T {}

/// `Sync` when the `rayon` feature is enabled, no bound otherwise.
#[cfg(not(feature = "rayon"))]
pub trait MaybeSync {}
#[cfg(not(feature = "rayon"))]
impl<T: ?Sized> MaybeSync for T {}

/// Call `f(k, chunk)` for each `chunk_len`-sized chunk `k` of `data`.
pub(crate) fn for_each_chunk_mut<F>(data: &mut [f64], chunk_len: usize, f: F)
where
    F: Fn(usize, &mut [f64]) + MaybeSync,
{
    if chunk_len == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(k, chunk)| f(k, chunk));
    }

    #[cfg(not(feature = "rayon"))]
    data.chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(k, chunk)| f(k, chunk));
}
