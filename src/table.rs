use crate::{error::Result, param::Parameter, registry::ParamRegistry};

/// A plain struct whose fields mirror a group of registry parameters.
///
/// Usually implemented with `#[derive(ParamTable)]`:
///
/// ```rust
/// use next_params::{ParamRegistry, ParamTable};
///
/// #[derive(Debug, Default, ParamTable)]
/// #[params(prefix = "motor_")]
/// struct MotorParams {
///     #[param(id = 10, range = "0..100", dimension = "%")]
///     max_pwm: u8,
///     #[param(id = 11, description = "Reverse the left motor")]
///     invert_left: bool,
/// }
///
/// let mut motor = MotorParams::default();
/// let mut registry = ParamRegistry::from_params(motor.params())?;
///
/// registry.set_value_by_name("motor_max_pwm", "75")?;
/// motor.apply(&registry)?;
/// assert_eq!(motor.max_pwm, 75);
/// # Ok::<(), next_params::Error>(())
/// ```
pub trait ParamTable {
    /// One record per field, valued from `self`, defaulted from
    /// `Default::default()`.
    fn params(&self) -> Vec<Parameter>;

    /// Refreshes every field from the registry's current values.
    fn apply(&mut self, registry: &ParamRegistry) -> Result<()>;
}
