//! Build entry points: allocate exact buffers, draw randomness once, generate.

use bstr::BString;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::error::ZrandResult;
use crate::op::Op;

/// Generate bytes from `op` using the operating system's secure RNG.
pub fn build(op: &Op) -> ZrandResult<Vec<u8>> {
    build_with(op, &mut OsRng)
}

/// Generate text from `op` using the operating system's secure RNG.
///
/// The bytes are returned as-is; no encoding validation is performed, so trees
/// that split multi-byte characters still succeed.
pub fn build_string(op: &Op) -> ZrandResult<BString> {
    build_string_with(op, &mut OsRng)
}

/// Generate bytes from `op`, filling the randomness buffer from `rng`.
///
/// The RNG is called at most once, for exactly `op.randomness_len()` bytes, and
/// not at all when the tree needs no randomness. Scratch and randomness are
/// wiped before returning, and no partial output is returned on failure.
pub fn build_with<R: RngCore + ?Sized>(op: &Op, rng: &mut R) -> ZrandResult<Vec<u8>> {
    let req = op.requirements();
    debug!(
        output = req.output,
        scratch = req.scratch,
        randomness = req.randomness,
        "building"
    );

    let mut output = Zeroizing::new(vec![0u8; req.output]);
    let mut scratch = Zeroizing::new(vec![0u8; req.scratch]);
    let mut randomness = Zeroizing::new(vec![0u8; req.randomness]);

    if req.randomness > 0 {
        rng.try_fill_bytes(randomness.as_mut_slice())?;
    }

    op.generate(&mut output, &mut scratch, &randomness)?;
    trace!(len = output.len(), "generated");

    Ok(std::mem::take(&mut *output))
}

pub fn build_string_with<R: RngCore + ?Sized>(op: &Op, rng: &mut R) -> ZrandResult<BString> {
    build_with(op, rng).map(BString::from)
}
