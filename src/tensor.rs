//! Post-processing for transformer hidden-state tensors.
//!
//! # Dropping Auxiliary Positions
//!
//! ```text
//! model output:   (1, L, ...)          batch of one sentence
//! squeeze(0):     (L, ...)
//! drop last:      (L-1, ...)
//! drop ends:      (L-3, ...)           positions 1..L-2 of the original
//! ```
//!
//! The three dropped positions assume the model emits one leading marker,
//! two trailing ones (`[SEP]` plus an extra slot). Verify this against the
//! producing model before relying on the positions lining up with subwords.

use candle_core::{DType, Tensor, D};

use crate::{Error, Result};

/// Strip the batch axis and the auxiliary sequence positions.
///
/// Input `(1, L, ...)` with `L >= 3`; output `(L - 3, ...)`.
pub fn drop_auxiliary_dimensions(hidden: &Tensor) -> Result<Tensor> {
    let dims = hidden.dims();
    if dims.len() < 3 {
        return Err(Error::precondition(format!(
            "expected rank >= 3 (batch, seq, ...), got shape {:?}",
            dims
        )));
    }
    if dims[0] != 1 {
        return Err(Error::precondition(format!(
            "expected batch size 1, got {}",
            dims[0]
        )));
    }
    let len = dims[1];
    if len < 3 {
        return Err(Error::precondition(format!(
            "sequence length {} leaves nothing after dropping 3 positions",
            len
        )));
    }

    let seq = hidden.squeeze(0)?;
    let seq = seq.narrow(0, 0, len - 1)?;
    Ok(seq.narrow(0, 1, len - 3)?)
}

/// Scale every innermost vector to unit L2 norm.
///
/// Fails if any vector has zero norm.
pub fn normalize_vectors(vectors: &Tensor) -> Result<Tensor> {
    if vectors.rank() == 0 {
        return Err(Error::precondition("cannot normalize a scalar"));
    }
    let norm = vectors.sqr()?.sum_keepdim(D::Minus1)?.sqrt()?;

    let zeros = norm
        .to_dtype(DType::F64)?
        .flatten_all()?
        .to_vec1::<f64>()?
        .into_iter()
        .filter(|n| *n == 0.0)
        .count();
    if zeros > 0 {
        return Err(Error::precondition(format!(
            "{} vector(s) have zero norm",
            zeros
        )));
    }

    Ok(vectors.broadcast_div(&norm)?)
}

/// Merge the last two axes: `(..., h, d)` to `(..., h * d)`.
pub fn flatten_last_two_axes(tensor: &Tensor) -> Result<Tensor> {
    let dims = tensor.dims();
    let rank = dims.len();
    if rank < 2 {
        return Err(Error::precondition(format!(
            "expected rank >= 2, got shape {:?}",
            dims
        )));
    }
    let mut shape = dims[..rank - 2].to_vec();
    shape.push(dims[rank - 2] * dims[rank - 1]);
    Ok(tensor.reshape(shape)?)
}
