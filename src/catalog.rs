//! TOML catalog of parameter definitions.
//!
//! A catalog is the human-edited source of a registry's records:
//!
//! ```toml
//! [[param]]
//! id = 1
//! name = "gain"
//! default = "10"
//! range = "0..100"
//! type = "int32"
//! dimension = "dB"
//! description = "Amplifier gain"
//!
//! [[param]]
//! id = 2
//! name = "mode"
//! value = "auto"
//! default = "manual"
//! type = "string"
//! ```
//!
//! `value` is optional and falls back to `default`. Unknown `type` tags are
//! rejected while parsing.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    param::{ParamType, Parameter},
    registry::ParamRegistry,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CatalogEntry {
    id: u32,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default)]
    default: String,
    #[serde(default)]
    range: String,
    #[serde(rename = "type")]
    ty: ParamType,
    #[serde(default)]
    dimension: String,
    #[serde(default)]
    description: String,
}

impl From<CatalogEntry> for Parameter {
    fn from(entry: CatalogEntry) -> Self {
        Parameter {
            id: entry.id,
            name: entry.name,
            value: entry.value.unwrap_or_else(|| entry.default.clone()),
            default_value: entry.default,
            range: entry.range,
            ty: entry.ty,
            dimension: entry.dimension,
            description: entry.description,
        }
    }
}

impl From<&Parameter> for CatalogEntry {
    fn from(param: &Parameter) -> Self {
        CatalogEntry {
            id: param.id,
            name: param.name.clone(),
            value: (param.value != param.default_value).then(|| param.value.clone()),
            default: param.default_value.clone(),
            range: param.range.clone(),
            ty: param.ty,
            dimension: param.dimension.clone(),
            description: param.description.clone(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "param")]
    params: Vec<CatalogEntry>,
}

/// An ordered list of parameter definitions read from TOML.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamCatalog {
    params: Vec<Parameter>,
}

impl ParamCatalog {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)?;
        Ok(Self {
            params: file.params.into_iter().map(Parameter::from).collect(),
        })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            params: self.params.iter().map(CatalogEntry::from).collect(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Binds a fresh registry to the catalog's definitions.
    pub fn into_registry(self) -> Result<ParamRegistry> {
        ParamRegistry::from_params(self.params)
    }
}

impl From<Vec<Parameter>> for ParamCatalog {
    fn from(params: Vec<Parameter>) -> Self {
        Self { params }
    }
}

impl From<&ParamRegistry> for ParamCatalog {
    fn from(registry: &ParamRegistry) -> Self {
        Self {
            params: registry.iter().cloned().collect(),
        }
    }
}

impl IntoIterator for ParamCatalog {
    type Item = Parameter;
    type IntoIter = std::vec::IntoIter<Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}
