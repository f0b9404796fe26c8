//! Declarative recipes: serializable descriptions of operation trees
//!
//! A recipe mirrors [`Op`] one-to-one and adds named alphabets, so trees can be
//! written in configuration files:
//! ```toml
//! [recipes.pin]
//! select = { source = { alphabet = "numerics" }, size = 6 }
//! ```

use serde::{Deserialize, Serialize};

use crate::alphabet::{letters, LOWERS, NUMERICS, UPPERS};
use crate::error::ZrandResult;
use crate::op::Op;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    Lowers,
    Uppers,
    Letters,
    Numerics,
}

impl Alphabet {
    pub fn to_op(self) -> Op {
        match self {
            Alphabet::Lowers => LOWERS,
            Alphabet::Uppers => UPPERS,
            Alphabet::Letters => letters(),
            Alphabet::Numerics => NUMERICS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipe {
    /// Fixed text, emitted as its UTF-8 bytes
    Literal(String),
    /// Fixed raw bytes, for literals that are not UTF-8
    Bytes(Vec<u8>),
    Alphabet(Alphabet),
    Concat(Vec<Recipe>),
    Select(SelectRecipe),
    Shuffle(Box<Recipe>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectRecipe {
    pub source: Box<Recipe>,
    pub size: usize,
}

impl Recipe {
    pub fn select(source: Recipe, size: usize) -> Recipe {
        Recipe::Select(SelectRecipe {
            source: Box::new(source),
            size,
        })
    }

    pub fn shuffle(source: Recipe) -> Recipe {
        Recipe::Shuffle(Box::new(source))
    }

    /// Fails with [`crate::ZrandError::SizeOverflow`] when the sizes in the
    /// recipe do not fit the requirement counters.
    pub fn to_op(&self) -> ZrandResult<Op> {
        match self {
            Recipe::Literal(text) => Ok(Op::literal(text.clone().into_bytes())),
            Recipe::Bytes(bytes) => Ok(Op::literal(bytes.clone())),
            Recipe::Alphabet(alphabet) => Ok(alphabet.to_op()),
            Recipe::Concat(parts) => {
                let ops = parts
                    .iter()
                    .map(Recipe::to_op)
                    .collect::<ZrandResult<Vec<_>>>()?;
                Op::try_concat(ops)
            }
            Recipe::Select(select) => Op::try_select(select.source.to_op()?, select.size),
            Recipe::Shuffle(source) => Op::try_shuffle(source.to_op()?),
        }
    }
}

/// Recipes available without any configuration, in display order.
pub fn builtins() -> Vec<(&'static str, Recipe)> {
    vec![
        ("password", password()),
        (
            "token",
            Recipe::select(
                Recipe::Concat(vec![
                    Recipe::Alphabet(Alphabet::Letters),
                    Recipe::Alphabet(Alphabet::Numerics),
                ]),
                32,
            ),
        ),
        ("pin", Recipe::select(Recipe::Alphabet(Alphabet::Numerics), 6)),
        (
            "hex",
            Recipe::select(Recipe::Literal("0123456789abcdef".to_string()), 32),
        ),
    ]
}

pub fn builtin(name: &str) -> Option<Recipe> {
    builtins()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, recipe)| recipe)
}

/// Recipe form of [`crate::alphabet::password`].
fn password() -> Recipe {
    Recipe::Concat(vec![
        Recipe::select(Recipe::Alphabet(Alphabet::Uppers), 3),
        Recipe::shuffle(Recipe::Concat(vec![
            Recipe::select(Recipe::Alphabet(Alphabet::Lowers), 3),
            Recipe::select(Recipe::Alphabet(Alphabet::Numerics), 3),
            Recipe::select(Recipe::Alphabet(Alphabet::Letters), 3),
        ])),
        Recipe::select(Recipe::Alphabet(Alphabet::Lowers), 3),
    ])
}
