use std::path::PathBuf;

use thiserror::Error;

use crate::param::{ParamType, ParameterBuilderError};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parameter id {0} does not exist")]
    IdNotFound(u32),

    #[error("Parameter `{0}` does not exist")]
    NameNotFound(String),

    #[error("Parameter id {0} is already registered")]
    DuplicateId(u32),

    #[error("Parameter name `{0}` is already registered")]
    DuplicateName(String),

    /// A name that could not be written to and read back from a `.param`
    /// file unchanged.
    #[error("Invalid parameter name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A value did not lexically conform to the parameter's declared type.
    ///
    /// The parameter is left unmodified when this is returned from a
    /// mutation.
    #[error("Invalid value `{value}` for parameter `{name}` ({ty}): {reason}")]
    InvalidValue {
        name: String,
        value: String,
        ty: ParamType,
        reason: String,
    },

    #[error("Unknown parameter type `{0}`")]
    UnknownType(String),

    #[error("{} is not a .param file", .path.display())]
    BadExtension { path: PathBuf },

    /// A line of a parameter file did not split into exactly `name,value`.
    #[error("Malformed line {line_number} in {}: `{line}`", .path.display())]
    MalformedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    /// Applying a well-formed line of a parameter file failed.
    ///
    /// Lines before `line_number` have already been applied.
    #[error("Cannot apply line {line_number} of {} (`{line}`): {source}", .path.display())]
    Load {
        path: PathBuf,
        line_number: usize,
        line: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Cannot reset parameters to defaults: {source}")]
    Reset {
        #[source]
        source: Box<Error>,
    },

    #[error("Parameter builder: {0}")]
    Builder(#[from] ParameterBuilderError),

    #[error("TOML Serialization: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("TOML Deserialization: {0}")]
    TomlDeserialization(#[from] toml::de::Error),

    #[error("Deserialization: {0}")]
    Deserialization(#[from] serde_value::DeserializerError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
