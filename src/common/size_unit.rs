// SizeUnit
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use std::str::FromStr;

/// `SizeUnit` represents how we want the bucket sizes to be displayed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SizeUnit {
    /// Represent bucket sizes using IEC units (multiples of 1024) as
    /// formatted by `humansize`.
    Binary,

    /// Represent bucket sizes as the number of bytes.
    Bytes,

    /// Represent bucket sizes using SI units (multiples of 1000) as formatted
    /// by `humansize`.
    Decimal,

    /// Represent bucket sizes as bytes below 1024, and as KB, MB or GB with
    /// two decimal places above that.
    Human,
}

/// This converts from the string arguments we receive on the command line to
/// our enum type.
impl FromStr for SizeUnit {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary"  => Ok(Self::Binary),
            "bytes"   => Ok(Self::Bytes),
            "decimal" => Ok(Self::Decimal),
            "human"   => Ok(Self::Human),
            _         => Err("no match"),
        }
    }
}
