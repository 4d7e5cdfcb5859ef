//! The parameter record and its type tag set.
//!
//! A [`Parameter`] stores its value as a canonical string, tagged with a
//! [`ParamType`] that decides which strings are acceptable. Records are
//! usually built with [`ParameterBuilder`], loaded from a
//! [`ParamCatalog`](crate::ParamCatalog), or generated by
//! `#[derive(ParamTable)]`.
//!
//! # Example
//!
//! ```rust
//! use next_params::{ParamType, ParameterBuilder};
//!
//! let gain = ParameterBuilder::default()
//!     .id(1u32)
//!     .name("gain")
//!     .default_value("10")
//!     .ty(ParamType::Int32)
//!     .dimension("dB")
//!     .build()?;
//!
//! assert_eq!(gain.value, "10");
//! assert_eq!(gain.full_record().to_string(), "1,gain,10,10,,int32,dB,");
//! # Ok::<(), next_params::Error>(())
//! ```
use std::{fmt, str::FromStr};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Primitive type tag of a parameter.
///
/// The set is closed: adding a tag means extending
/// [`validate`](crate::validate::validate) as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    String,
    Bool,
}

impl ParamType {
    pub const ALL: [ParamType; 12] = [
        ParamType::Int8,
        ParamType::Int16,
        ParamType::Int32,
        ParamType::Int64,
        ParamType::Uint8,
        ParamType::Uint16,
        ParamType::Uint32,
        ParamType::Uint64,
        ParamType::Float,
        ParamType::Double,
        ParamType::String,
        ParamType::Bool,
    ];

    /// The tag as written in catalogs and full-record renderings.
    pub const fn as_str(self) -> &'static str {
        match self {
            ParamType::Int8 => "int8",
            ParamType::Int16 => "int16",
            ParamType::Int32 => "int32",
            ParamType::Int64 => "int64",
            ParamType::Uint8 => "uint8",
            ParamType::Uint16 => "uint16",
            ParamType::Uint32 => "uint32",
            ParamType::Uint64 => "uint64",
            ParamType::Float => "float",
            ParamType::Double => "double",
            ParamType::String => "string",
            ParamType::Bool => "bool",
        }
    }

    pub const fn is_integer(self) -> bool {
        !matches!(
            self,
            ParamType::Float | ParamType::Double | ParamType::String | ParamType::Bool
        )
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| Error::UnknownType(s.to_string()))
    }
}

/// A single named, typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Parameter {
    /// Unique numeric identifier.
    pub id: u32,

    /// Unique, non-empty key.
    pub name: String,

    /// Current value in its canonical string form.
    ///
    /// When left unset on the builder, the value starts out as the default.
    #[builder(default = "self.default_value.clone().unwrap_or_default()")]
    pub value: String,

    /// Factory value restored by
    /// [`reset_all_to_default`](crate::ParamRegistry::reset_all_to_default).
    #[serde(rename = "default")]
    #[builder(default)]
    pub default_value: String,

    /// Human readable bounds, e.g. `0..100`. Not enforced.
    #[serde(default)]
    #[builder(default)]
    pub range: String,

    #[serde(rename = "type")]
    pub ty: ParamType,

    /// Unit annotation such as `%`, `m` or `deg`.
    #[serde(default)]
    #[builder(default)]
    pub dimension: String,

    #[serde(default)]
    #[builder(default)]
    pub description: String,
}

impl ParameterBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.name.as_deref() {
            Some(name) if name.trim().is_empty() => Err("name must not be empty".to_string()),
            _ => Ok(()),
        }
    }
}

impl Parameter {
    pub fn builder() -> ParameterBuilder {
        ParameterBuilder::default()
    }

    /// Renders all eight fields comma-joined, in the fixed order
    /// `id,name,value,default,range,type,dimension,description`.
    ///
    /// No escaping is applied.
    pub fn full_record(&self) -> FullRecord<'_> {
        FullRecord(self)
    }
}

/// Display adapter returned by [`Parameter::full_record`].
pub struct FullRecord<'a>(&'a Parameter);

impl fmt::Display for FullRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            p.id, p.name, p.value, p.default_value, p.range, p.ty, p.dimension, p.description
        )
    }
}
