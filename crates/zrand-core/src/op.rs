//! Operation tree and the exact-size region protocol
//!
//! Every [`Op`] carries its [`Requirements`]: the number of output, scratch and
//! randomness bytes it needs. The triple is computed once, when the node is
//! constructed, from the cached triples of its children. Generation splits the
//! regions it is given using those same cached triples, so accounting and
//! generation always agree on how the buffers are partitioned.
//!
//! Region layout for each node kind:
//! ```text
//! literal   output = bytes
//! concat    output = [child0][child1]...   scratch/randomness split the same way
//! select    scratch = [materialized source][source scratch]
//!           randomness = [source randomness][one byte per drawn output byte]
//! shuffle   output = source output, shuffled in place
//!           randomness = [source randomness][one byte per output position]
//! ```

use std::borrow::Cow;

use crate::error::{Region, ZrandError, ZrandResult};

/// Largest materialized source a select can draw from. Each draw indexes the
/// source with a single randomness byte.
pub const MAX_SOURCE_LEN: usize = 256;

/// Byte counts an operation needs for one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Requirements {
    /// Bytes written to the output region
    pub output: usize,
    /// Bytes of scratch space used while generating
    pub scratch: usize,
    /// Bytes of randomness consumed
    pub randomness: usize,
}

impl Requirements {
    pub const ZERO: Requirements = Requirements {
        output: 0,
        scratch: 0,
        randomness: 0,
    };

    /// Component-wise sum, `None` if any count overflows `usize`.
    pub fn checked_add(self, rhs: Requirements) -> Option<Requirements> {
        Some(Requirements {
            output: self.output.checked_add(rhs.output)?,
            scratch: self.scratch.checked_add(rhs.scratch)?,
            randomness: self.randomness.checked_add(rhs.randomness)?,
        })
    }
}


/// The four operation kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpKind {
    /// Emit fixed bytes verbatim.
    Literal(Cow<'static, [u8]>),
    /// Children's outputs laid end to end.
    Concat(Vec<Op>),
    /// Draw `size` bytes with replacement from the materialized source.
    Select { source: Box<Op>, size: usize },
    /// Generate the source, then permute it in place.
    Shuffle(Box<Op>),
}

/// An immutable, reusable description of how to produce a fixed-length byte
/// sequence. Build trees with [`Op::literal`], [`Op::concat`], [`Op::select`]
/// and [`Op::shuffle`], then hand the root to [`crate::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    kind: OpKind,
    req: Requirements,
}

impl Op {
    /// A literal over static bytes, usable in `const` items.
    pub const fn from_static(bytes: &'static [u8]) -> Op {
        Op {
            kind: OpKind::Literal(Cow::Borrowed(bytes)),
            req: Requirements {
                output: bytes.len(),
                scratch: 0,
                randomness: 0,
            },
        }
    }

    pub fn literal(bytes: impl Into<Cow<'static, [u8]>>) -> Op {
        let bytes = bytes.into();
        let req = Requirements {
            output: bytes.len(),
            ..Requirements::ZERO
        };
        Op {
            kind: OpKind::Literal(bytes),
            req,
        }
    }

    /// # Panics
    ///
    /// Panics if the summed requirements overflow `usize`; see [`Op::try_concat`].
    pub fn concat(ops: impl IntoIterator<Item = Op>) -> Op {
        Op::try_concat(ops).unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    ///
    /// Panics if the requirements overflow `usize`; see [`Op::try_select`].
    pub fn select(source: Op, size: usize) -> Op {
        Op::try_select(source, size).unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    ///
    /// Panics if the requirements overflow `usize`; see [`Op::try_shuffle`].
    pub fn shuffle(source: Op) -> Op {
        Op::try_shuffle(source).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_concat(ops: impl IntoIterator<Item = Op>) -> ZrandResult<Op> {
        Op::try_new(OpKind::Concat(ops.into_iter().collect()))
    }

    pub fn try_select(source: Op, size: usize) -> ZrandResult<Op> {
        Op::try_new(OpKind::Select {
            source: Box::new(source),
            size,
        })
    }

    pub fn try_shuffle(source: Op) -> ZrandResult<Op> {
        Op::try_new(OpKind::Shuffle(Box::new(source)))
    }

    fn try_new(kind: OpKind) -> ZrandResult<Op> {
        let req = requirements_of(&kind).ok_or(ZrandError::SizeOverflow)?;
        Ok(Op { kind, req })
    }

    pub fn kind(&self) -> &OpKind {
        &self.kind
    }

    pub fn requirements(&self) -> Requirements {
        self.req
    }

    pub fn output_len(&self) -> usize {
        self.req.output
    }

    pub fn scratch_len(&self) -> usize {
        self.req.scratch
    }

    pub fn randomness_len(&self) -> usize {
        self.req.randomness
    }

    /// Generate into caller-provided regions.
    ///
    /// Each region must be exactly the size reported by [`Op::requirements`].
    /// Output depends only on the randomness bytes; scratch content on entry is
    /// irrelevant. Fails if a select's materialized source is longer than
    /// [`MAX_SOURCE_LEN`] or empty while drawing.
    pub fn generate(
        &self,
        output: &mut [u8],
        scratch: &mut [u8],
        randomness: &[u8],
    ) -> ZrandResult<()> {
        check_region(Region::Output, self.req.output, output.len())?;
        check_region(Region::Scratch, self.req.scratch, scratch.len())?;
        check_region(Region::Randomness, self.req.randomness, randomness.len())?;

        self.fill(Regions {
            output,
            scratch,
            randomness,
        })
    }

    fn fill(&self, regions: Regions<'_>) -> ZrandResult<()> {
        match &self.kind {
            OpKind::Literal(bytes) => {
                regions.output.copy_from_slice(bytes);
                Ok(())
            }
            OpKind::Concat(ops) => {
                let mut rest = regions;
                for op in ops {
                    let (head, tail) = rest.split(op.req);
                    op.fill(head)?;
                    rest = tail;
                }
                debug_assert!(rest.is_empty(), "concat left regions unconsumed");
                Ok(())
            }
            OpKind::Select { source, size } => fill_select(source, *size, regions),
            OpKind::Shuffle(source) => fill_shuffle(source, regions),
        }
    }
}

/// One level of accounting: derives a node's triple from its children's
/// cached triples. `None` on overflow.
fn requirements_of(kind: &OpKind) -> Option<Requirements> {
    match kind {
        OpKind::Literal(bytes) => Some(Requirements {
            output: bytes.len(),
            ..Requirements::ZERO
        }),
        OpKind::Concat(ops) => ops
            .iter()
            .try_fold(Requirements::ZERO, |acc, op| acc.checked_add(op.req)),
        OpKind::Select { source, size } => Some(Requirements {
            output: *size,
            scratch: source.req.output.checked_add(source.req.scratch)?,
            randomness: size.checked_add(source.req.randomness)?,
        }),
        OpKind::Shuffle(source) => Some(Requirements {
            output: source.req.output,
            scratch: source.req.scratch,
            randomness: source.req.output.checked_add(source.req.randomness)?,
        }),
    }
}

fn check_region(region: Region, expected: usize, actual: usize) -> ZrandResult<()> {
    if expected != actual {
        return Err(ZrandError::RegionMismatch {
            region,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Disjoint views into the three buffers, sized for exactly one node.
struct Regions<'a> {
    output: &'a mut [u8],
    scratch: &'a mut [u8],
    randomness: &'a [u8],
}

impl<'a> Regions<'a> {
    /// Split off the leading regions sized by `req`. Sizes were validated at
    /// the root, so every split stays in bounds.
    fn split(self, req: Requirements) -> (Regions<'a>, Regions<'a>) {
        let (output, rest_output) = self.output.split_at_mut(req.output);
        let (scratch, rest_scratch) = self.scratch.split_at_mut(req.scratch);
        let (randomness, rest_randomness) = self.randomness.split_at(req.randomness);
        (
            Regions {
                output,
                scratch,
                randomness,
            },
            Regions {
                output: rest_output,
                scratch: rest_scratch,
                randomness: rest_randomness,
            },
        )
    }

    fn is_empty(&self) -> bool {
        self.output.is_empty() && self.scratch.is_empty() && self.randomness.is_empty()
    }
}

fn fill_select(source: &Op, size: usize, regions: Regions<'_>) -> ZrandResult<()> {
    let Regions {
        output,
        scratch,
        randomness,
    } = regions;

    let len = source.req.output;
    if len > MAX_SOURCE_LEN {
        return Err(ZrandError::SourceTooLarge { len });
    }
    if len == 0 && size > 0 {
        return Err(ZrandError::EmptySource { size });
    }

    let (materialized, source_scratch) = scratch.split_at_mut(len);
    let (source_randomness, draws) = randomness.split_at(source.req.randomness);
    source.fill(Regions {
        output: &mut *materialized,
        scratch: source_scratch,
        randomness: source_randomness,
    })?;

    for (slot, r) in output.iter_mut().zip(draws) {
        *slot = materialized[usize::from(*r) % len];
    }
    Ok(())
}

fn fill_shuffle(source: &Op, regions: Regions<'_>) -> ZrandResult<()> {
    let Regions {
        output,
        scratch,
        randomness,
    } = regions;

    let (source_randomness, swaps) = randomness.split_at(source.req.randomness);
    source.fill(Regions {
        output: &mut *output,
        scratch,
        randomness: source_randomness,
    })?;

    // Position i draws from byte i of the swap region; byte 0 is never read.
    for i in (1..output.len()).rev() {
        let j = usize::from(swaps[i]) % i;
        output.swap(i, j);
    }
    Ok(())
}
