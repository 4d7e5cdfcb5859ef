//! The parameter registry.
//!
//! [`ParamRegistry`] owns a set of [`Parameter`] records, indexes them by id
//! and by name, validates every write against the record's [`ParamType`],
//! and records each successful write in a [`ChangeLedger`] for a downstream
//! consumer to drain.
//!
//! # Example
//!
//! ```rust,no_run
//! use next_params::{ParamRegistry, ParamType, Parameter};
//!
//! # fn main() -> Result<(), next_params::Error> {
//! let gain = Parameter::builder()
//!     .id(1u32)
//!     .name("gain")
//!     .default_value("10")
//!     .ty(ParamType::Int32)
//!     .build()?;
//!
//! let mut registry = ParamRegistry::from_params([gain])?;
//! registry.clear_pending_changes();
//!
//! registry.set_value_by_name("gain", "25")?;
//! assert!(registry.set_value_by_name("gain", "abc").is_err());
//! assert_eq!(registry.value_by_id(1, false)?, "25");
//!
//! // Push the change to hardware, then drain.
//! for id in registry.take_pending_changes() {
//!     println!("changed: {id}");
//! }
//!
//! registry.save("cfg.param")?;
//! # Ok(())
//! # }
//! ```
use std::{collections::HashMap, path::Path};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    atomic::ParamFile,
    codec,
    error::{Error, Result},
    ledger::ChangeLedger,
    param::Parameter,
    validate::{self, validate},
};

/// Owned, dual-indexed parameter store.
///
/// Records are kept in insertion order, keyed by id. A secondary index maps
/// names to ids. Both indices are maintained by every structural change, so
/// lookups are always consistent with the stored records.
#[derive(Debug, Default, Clone)]
pub struct ParamRegistry {
    params: IndexMap<u32, Parameter>,
    by_name: HashMap<String, u32>,
    ledger: ChangeLedger,
}

impl ParamRegistry {
    /// Creates an empty registry with an empty change ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry and binds it to `params`.
    ///
    /// See [`bind`](ParamRegistry::bind).
    pub fn from_params(params: impl IntoIterator<Item = Parameter>) -> Result<Self> {
        let mut registry = Self::new();
        registry.bind(params)?;
        Ok(registry)
    }

    /// Replaces the registry contents with `params`.
    ///
    /// Both indices are rebuilt from scratch. Every record's value must
    /// conform to its type, and ids and names must be unique; the first
    /// violation aborts the bind. Nothing is replaced on failure, but a
    /// registry whose bind failed should not be relied upon by the caller.
    ///
    /// On success every bound id is appended to the change ledger, in
    /// order, and the ledger becomes dirty.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] - a name is empty or cannot round-trip through a `.param` file
    /// - [`Error::InvalidValue`] - a value does not conform to its type
    /// - [`Error::DuplicateId`] / [`Error::DuplicateName`] - uniqueness violated
    pub fn bind(&mut self, params: impl IntoIterator<Item = Parameter>) -> Result<()> {
        let params = params.into_iter();
        let mut store = IndexMap::with_capacity(params.size_hint().0);
        let mut by_name = HashMap::with_capacity(params.size_hint().0);

        for param in params {
            check_name(&param.name)?;
            check_value(&param, &param.value)?;
            if store.contains_key(&param.id) {
                return Err(Error::DuplicateId(param.id));
            }
            if by_name.contains_key(&param.name) {
                return Err(Error::DuplicateName(param.name));
            }
            by_name.insert(param.name.clone(), param.id);
            store.insert(param.id, param);
        }

        self.params = store;
        self.by_name = by_name;
        for id in self.params.keys() {
            self.ledger.record(*id);
        }

        info!(count = self.params.len(), "bound parameter registry");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over all parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.params.keys().copied()
    }

    /// Gives the records back to the caller, in insertion order.
    pub fn into_params(self) -> Vec<Parameter> {
        self.params.into_values().collect()
    }

    pub fn get_by_id(&self, id: u32) -> Option<&Parameter> {
        self.params.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&Parameter> {
        self.by_name.get(name).and_then(|id| self.params.get(id))
    }

    pub fn contains_id(&self, id: u32) -> bool {
        self.params.contains_key(&id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Sets a parameter's value, looked up by id.
    ///
    /// `raw` is trimmed and then validated against the parameter's type.
    /// On failure the parameter keeps its previous value. On success the id
    /// is appended to the change ledger.
    ///
    /// # Errors
    ///
    /// - [`Error::IdNotFound`] - no parameter has this id
    /// - [`Error::InvalidValue`] - the value does not conform to the type
    pub fn set_value_by_id(&mut self, id: u32, raw: &str) -> Result<()> {
        let param = self.params.get_mut(&id).ok_or(Error::IdNotFound(id))?;
        Self::assign(param, &mut self.ledger, raw)
    }

    /// Sets a parameter's value, looked up by name.
    ///
    /// Behaves like [`set_value_by_id`](ParamRegistry::set_value_by_id),
    /// returning [`Error::NameNotFound`] for unknown names.
    pub fn set_value_by_name(&mut self, name: &str, raw: &str) -> Result<()> {
        let id = *self
            .by_name
            .get(name)
            .ok_or_else(|| Error::NameNotFound(name.to_string()))?;
        let param = self.params.get_mut(&id).ok_or(Error::IdNotFound(id))?;
        Self::assign(param, &mut self.ledger, raw)
    }

    fn assign(param: &mut Parameter, ledger: &mut ChangeLedger, raw: &str) -> Result<()> {
        let value = raw.trim();
        check_value(param, value)?;

        debug!(id = param.id, name = %param.name, value, "parameter changed");
        param.value = value.to_string();
        ledger.record(param.id);
        Ok(())
    }

    /// Returns the current value, or the full eight-field record when
    /// `full` is set.
    pub fn value_by_id(&self, id: u32, full: bool) -> Result<String> {
        self.get_by_id(id)
            .map(|param| render(param, full))
            .ok_or(Error::IdNotFound(id))
    }

    /// Name-keyed counterpart of [`value_by_id`](ParamRegistry::value_by_id).
    pub fn value_by_name(&self, name: &str, full: bool) -> Result<String> {
        self.get_by_name(name)
            .map(|param| render(param, full))
            .ok_or_else(|| Error::NameNotFound(name.to_string()))
    }

    /// Parses a parameter's current value into `T`.
    ///
    /// The stored string is first converted according to the parameter's
    /// type (see [`Parameter::typed_value`]), so a `uint16` parameter can
    /// be read as `u16`, `u32`, `i64` and so on.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let param = self
            .get_by_name(name)
            .ok_or_else(|| Error::NameNotFound(name.to_string()))?;
        let value = param.typed_value()?;
        Ok(T::deserialize(value)?)
    }

    /// Adds a new parameter.
    ///
    /// The record is rejected as a whole if its name is invalid, its id or
    /// name is taken, or its value does not conform to its type.
    pub fn add_param(&mut self, param: Parameter) -> Result<()> {
        check_name(&param.name)?;
        if self.contains_id(param.id) {
            return Err(Error::DuplicateId(param.id));
        }
        if self.contains_name(&param.name) {
            return Err(Error::DuplicateName(param.name));
        }
        check_value(&param, &param.value)?;

        debug!(id = param.id, name = %param.name, "parameter added");
        self.by_name.insert(param.name.clone(), param.id);
        self.ledger.record(param.id);
        self.params.insert(param.id, param);
        Ok(())
    }

    /// Sets every parameter back to its default value, in insertion order.
    ///
    /// Each reset goes through the regular mutation path and is recorded
    /// in the ledger. The first failure stops the reset; parameters reset
    /// before it keep their default values.
    pub fn reset_all_to_default(&mut self) -> Result<()> {
        for param in self.params.values_mut() {
            let default = param.default_value.clone();
            if let Err(err) = Self::assign(param, &mut self.ledger, &default) {
                warn!(name = %param.name, "reset to defaults aborted");
                return Err(Error::Reset {
                    source: Box::new(err),
                });
            }
        }

        info!(count = self.params.len(), "parameters reset to defaults");
        Ok(())
    }

    /// Whether anything changed since the ledger was last cleared.
    pub fn has_pending_changes(&self) -> bool {
        self.ledger.is_dirty()
    }

    /// Ids changed since the ledger was last cleared, oldest first.
    pub fn pending_changes(&self) -> &[u32] {
        self.ledger.ids()
    }

    pub fn clear_pending_changes(&mut self) {
        self.ledger.clear();
    }

    /// Drains the ledger, returning the changed ids.
    pub fn take_pending_changes(&mut self) -> Vec<u32> {
        let ids = self.ledger.drain();
        debug!(count = ids.len(), "pending changes drained");
        ids
    }

    /// Writes every parameter as a `name,value` line to `path`.
    ///
    /// The path must end in `.param`. The file is replaced atomically under
    /// a `<path>.lock` sidecar, so a failed save leaves any previous file
    /// intact and never creates an empty one.
    ///
    /// # Errors
    ///
    /// - [`Error::BadExtension`] - `path` is not a `.param` file
    /// - [`Error::Io`] - the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ParamFile::new(path)?.write(&codec::encode(self.iter()))?;

        info!(path = %path.display(), count = self.params.len(), "parameters saved");
        Ok(())
    }

    /// Applies the `name,value` lines of `path` to the registry.
    ///
    /// Blank lines are skipped. Parameters that are not mentioned in the
    /// file keep their values. Loading stops at the first line that is
    /// malformed, names an unknown parameter, or carries an invalid value;
    /// lines before it stay applied.
    ///
    /// # Errors
    ///
    /// - [`Error::BadExtension`] - `path` is not a `.param` file
    /// - [`Error::Io`] - the file cannot be read
    /// - [`Error::MalformedLine`] - a line is not exactly `name,value`
    /// - [`Error::Load`] - a line could not be applied
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = ParamFile::new(path)?.read()?;

        let mut applied = 0usize;
        for entry in codec::entries(&contents, path) {
            let entry = entry.inspect_err(|_| {
                warn!(path = %path.display(), applied, "parameter load aborted");
            })?;

            if let Err(err) = self.set_value_by_name(entry.name, entry.value) {
                warn!(path = %path.display(), applied, "parameter load aborted");
                return Err(Error::Load {
                    path: path.to_path_buf(),
                    line_number: entry.line_number,
                    line: entry.line.to_string(),
                    source: Box::new(err),
                });
            }
            applied += 1;
        }

        info!(path = %path.display(), applied, "parameters loaded");
        Ok(())
    }
}

fn check_name(name: &str) -> Result<()> {
    validate::check_name(name).map_err(|reason| Error::InvalidName {
        name: name.to_string(),
        reason,
    })
}

fn check_value(param: &Parameter, value: &str) -> Result<()> {
    validate(value, param.ty).map_err(|reason| Error::InvalidValue {
        name: param.name.clone(),
        value: value.to_string(),
        ty: param.ty,
        reason,
    })
}

fn render(param: &Parameter, full: bool) -> String {
    match full {
        true => param.full_record().to_string(),
        false => param.value.clone(),
    }
}
