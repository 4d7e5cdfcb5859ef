pub mod atomic;
pub mod catalog;
pub mod codec;
pub mod error;
pub mod ledger;
pub mod param;
pub mod registry;
pub mod static_params;
pub mod table;
pub mod typed;
pub mod validate;

pub use catalog::ParamCatalog;
pub use codec::PARAM_FILE_EXTENSION;
pub use error::{Error, Result};
pub use ledger::ChangeLedger;
pub use param::{FullRecord, ParamType, Parameter, ParameterBuilder, ParameterBuilderError};
pub use registry::ParamRegistry;
pub use static_params::StaticParam;
pub use table::ParamTable;

// re-export macro
pub use next_params_macros::ParamTable;
