//! Identifiers for the block to request.
use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BlockIdError {
    #[error("Block identifier is empty")]
    Empty,
    #[error("Block number must not be negative: {0}")]
    Negative(String),
    #[error("Block number must be unsigned digits: {0}")]
    Signed(String),
    #[error("Invalid block identifier {input}: {source}")]
    InvalidNumber {
        input: String,
        source: ParseIntError,
    },
}

/// Symbolic block reference resolved by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
}

impl BlockTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
            BlockTag::Earliest => "earliest",
            BlockTag::Pending => "pending",
            BlockTag::Safe => "safe",
            BlockTag::Finalized => "finalized",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "latest" => Some(BlockTag::Latest),
            "earliest" => Some(BlockTag::Earliest),
            "pending" => Some(BlockTag::Pending),
            "safe" => Some(BlockTag::Safe),
            "finalized" => Some(BlockTag::Finalized),
            _ => None,
        }
    }
}

/// Block to request, by number or by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Number(u64),
    Tag(BlockTag),
}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::Tag(BlockTag::Latest)
    }
}

impl BlockId {
    /// Value for the block parameter of eth_getBlockByNumber (e.g., "0x85f410", "latest").
    pub fn to_param(&self) -> String {
        match self {
            BlockId::Number(number) => format!("0x{:x}", number),
            BlockId::Tag(tag) => tag.as_str().to_owned(),
        }
    }

    pub fn number(&self) -> Option<u64> {
        match self {
            BlockId::Number(number) => Some(*number),
            BlockId::Tag(_) => None,
        }
    }
}

impl From<u64> for BlockId {
    fn from(number: u64) -> Self {
        BlockId::Number(number)
    }
}

impl From<BlockTag> for BlockId {
    fn from(tag: BlockTag) -> Self {
        BlockId::Tag(tag)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Number(number) => write!(f, "{number}"),
            BlockId::Tag(tag) => f.write_str(tag.as_str()),
        }
    }
}

/// Parses decimal ("8778768"), 0x-prefixed hex ("0x85f410") or a tag ("finalized").
impl FromStr for BlockId {
    type Err = BlockIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(BlockIdError::Empty);
        }
        if let Some(tag) = BlockTag::from_name(&input.to_ascii_lowercase()) {
            return Ok(BlockId::Tag(tag));
        }
        if input.starts_with('-') {
            return Err(BlockIdError::Negative(input.to_owned()));
        }
        let (digits, radix) = match input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
        {
            Some(hex) => (hex, 16),
            None => (input, 10),
        };
        // u64 parsing accepts a leading '+'.
        if digits.starts_with('+') {
            return Err(BlockIdError::Signed(input.to_owned()));
        }
        u64::from_str_radix(digits, radix)
            .map(BlockId::Number)
            .map_err(|source| BlockIdError::InvalidNumber {
                input: input.to_owned(),
                source,
            })
    }
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_param())
    }
}
