//! Built-in parameters registered at link time.
//!
//! Any crate linked into the application can contribute parameters with
//! [`submit_param!`](crate::submit_param); [`ParamRegistry::from_registered`]
//! collects them all.
//!
//! ```rust,ignore
//! use next_params::{ParamType, StaticParam, submit_param};
//!
//! submit_param!(
//!     StaticParam::new(10, "motor_max_pwm", "80", ParamType::Uint8)
//!         .range("0..100")
//!         .dimension("%")
//!         .description("PWM duty cap")
//! );
//! ```
use crate::{
    error::Result,
    param::{ParamType, Parameter},
    registry::ParamRegistry,
};

/// A parameter definition built in a `const` context.
#[derive(Debug, Clone, Copy)]
pub struct StaticParam {
    pub id: u32,
    pub name: &'static str,
    pub default: &'static str,
    pub ty: ParamType,
    pub range: &'static str,
    pub dimension: &'static str,
    pub description: &'static str,
}

impl StaticParam {
    pub const fn new(id: u32, name: &'static str, default: &'static str, ty: ParamType) -> Self {
        Self {
            id,
            name,
            default,
            ty,
            range: "",
            dimension: "",
            description: "",
        }
    }

    pub const fn range(mut self, range: &'static str) -> Self {
        self.range = range;
        self
    }

    pub const fn dimension(mut self, dimension: &'static str) -> Self {
        self.dimension = dimension;
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// An owned record whose value starts at the default.
    pub fn to_param(&self) -> Parameter {
        Parameter {
            id: self.id,
            name: self.name.to_string(),
            value: self.default.to_string(),
            default_value: self.default.to_string(),
            range: self.range.to_string(),
            ty: self.ty,
            dimension: self.dimension.to_string(),
            description: self.description.to_string(),
        }
    }
}

inventory::collect!(StaticParam);

#[macro_export]
macro_rules! submit_param {
    ($param:expr) => {
        ::inventory::submit! {
            $param
        }
    };
}

/// All submitted definitions, sorted by id.
pub fn registered() -> Vec<Parameter> {
    let mut params: Vec<Parameter> = inventory::iter::<StaticParam>
        .into_iter()
        .map(StaticParam::to_param)
        .collect();
    params.sort_by_key(|p| p.id);
    params
}

impl ParamRegistry {
    /// Binds a new registry to every parameter submitted with
    /// [`submit_param!`](crate::submit_param), in id order.
    ///
    /// Submissions are checked like any other bind: duplicate ids or names
    /// and non-conforming defaults are reported as errors.
    pub fn from_registered() -> Result<Self> {
        ParamRegistry::from_params(registered())
    }
}
