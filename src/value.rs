//! Typed values and their byte encoding
//!
//! The codec only deals in bytes. This module is the thin layer that turns
//! typed values into those bytes using a fixed set of rules:
//!
//! - integers render as decimal ASCII
//! - floats render as fixed-point decimal with six fractional digits, or as
//!   `NaN`, `+Inf` and `-Inf` when not finite
//! - strings and raw bytes pass through unchanged
//! - structured values serialize as compact JSON (feature `json`)

use crate::error::Result;
#[cfg(feature = "json")]
use crate::error::Error;

/// A value that can be stored in a `tEXt` chunk
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// Structured data, stored as compact JSON
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

impl Value {
    /// Capture any serializable value as [`Value::Json`]
    ///
    /// Fails with [`Error::UnsupportedValue`] when serialization fails, for
    /// instance for maps whose keys are not strings.
    #[cfg(feature = "json")]
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| Error::UnsupportedValue(e.to_string()))
    }

    /// Encode the value to the bytes stored after the key's NUL separator
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::Int(v) => Ok(v.to_string().into_bytes()),
            Self::UInt(v) => Ok(v.to_string().into_bytes()),
            Self::Float(v) => Ok(render_float(*v).into_bytes()),
            Self::Text(s) => Ok(s.as_bytes().to_vec()),
            Self::Bytes(b) => Ok(b.clone()),
            #[cfg(feature = "json")]
            Self::Json(v) => {
                serde_json::to_vec(v).map_err(|e| Error::UnsupportedValue(e.to_string()))
            }
        }
    }
}

fn render_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let sign = if v.is_sign_positive() { '+' } else { '-' };
        format!("{sign}Inf")
    } else {
        format!("{v:.6}")
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::UInt(v as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}
