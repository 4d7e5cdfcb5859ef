//! Typed views of string-stored parameter values.
use serde_value::Value;

use crate::{
    error::{Error, Result},
    param::{ParamType, Parameter},
    validate::{parse_bool, validate},
};

impl Parameter {
    /// Converts the stored value into a [`serde_value::Value`] of the
    /// variant matching the parameter's type.
    ///
    /// The result can be deserialized into any compatible Rust type, which
    /// is how [`ParamRegistry::get_as`](crate::ParamRegistry::get_as) works.
    pub fn typed_value(&self) -> Result<Value> {
        let invalid = |reason: String| Error::InvalidValue {
            name: self.name.clone(),
            value: self.value.clone(),
            ty: self.ty,
            reason,
        };
        validate(&self.value, self.ty).map_err(invalid)?;

        let v = self.value.as_str();
        // Conformance was checked above, so the parses below cannot fail.
        let value = match self.ty {
            ParamType::Int8 => v.parse().map(Value::I8).ok(),
            ParamType::Int16 => v.parse().map(Value::I16).ok(),
            ParamType::Int32 => v.parse().map(Value::I32).ok(),
            ParamType::Int64 => v.parse().map(Value::I64).ok(),
            ParamType::Uint8 => v.parse().map(Value::U8).ok(),
            ParamType::Uint16 => v.parse().map(Value::U16).ok(),
            ParamType::Uint32 => v.parse().map(Value::U32).ok(),
            ParamType::Uint64 => v.parse().map(Value::U64).ok(),
            ParamType::Float => v.parse().map(Value::F32).ok(),
            ParamType::Double => v.parse().map(Value::F64).ok(),
            ParamType::Bool => parse_bool(v).map(Value::Bool).ok(),
            ParamType::String => Some(Value::String(self.value.clone())),
        };

        value.ok_or_else(|| invalid(format!("cannot convert '{v}' to {}", self.ty)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(ty: ParamType, value: &str) -> Parameter {
        Parameter::builder()
            .id(1u32)
            .name("p")
            .value(value)
            .ty(ty)
            .build()
            .unwrap()
    }

    #[test]
    fn test_typed_value_variants() {
        assert_eq!(param(ParamType::Int8, "-5").typed_value().unwrap(), Value::I8(-5));
        assert_eq!(param(ParamType::Uint64, "7").typed_value().unwrap(), Value::U64(7));
        assert_eq!(param(ParamType::Double, "2.5").typed_value().unwrap(), Value::F64(2.5));
        assert_eq!(param(ParamType::Bool, "true").typed_value().unwrap(), Value::Bool(true));
        assert_eq!(
            param(ParamType::String, "auto").typed_value().unwrap(),
            Value::String("auto".into())
        );
    }

    #[test]
    fn test_typed_value_rejects_non_conforming_record() {
        let err = param(ParamType::Uint8, "900").typed_value().unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref name, .. } if name == "p"));
    }
}
