use next_params::{
    Error, ParamCatalog, ParamRegistry, ParamTable, ParamType, StaticParam, submit_param,
};
use pretty_assertions::assert_eq;

const CATALOG: &str = r#"
[[param]]
id = 1
name = "gain"
default = "10"
range = "0..100"
type = "int32"
dimension = "dB"
description = "Amplifier gain"

[[param]]
id = 2
name = "mode"
value = "auto"
default = "manual"
type = "string"
"#;

submit_param!(
    StaticParam::new(500, "builtin_rate", "50", ParamType::Uint16)
        .range("1..400")
        .dimension("Hz")
        .description("Control loop rate")
);
submit_param!(StaticParam::new(501, "builtin_trim", "0.0", ParamType::Float));

#[test]
fn test_catalog_from_toml() {
    let catalog = ParamCatalog::from_toml_str(CATALOG).expect("Failed to parse catalog");

    let params = catalog.params();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].value, "10", "value falls back to the default");
    assert_eq!(params[0].ty, ParamType::Int32);
    assert_eq!(params[0].dimension, "dB");
    assert_eq!(params[1].value, "auto");
    assert_eq!(params[1].default_value, "manual");
    assert_eq!(params[1].range, "");
}

#[test]
fn test_catalog_rejects_unknown_type() {
    let toml = r#"
[[param]]
id = 1
name = "gain"
default = "10"
type = "int24"
"#;
    assert!(matches!(
        ParamCatalog::from_toml_str(toml),
        Err(Error::TomlDeserialization(_))
    ));
}

#[test]
fn test_catalog_into_registry_validates_values() {
    let registry = ParamCatalog::from_toml_str(CATALOG)
        .and_then(ParamCatalog::into_registry)
        .expect("Failed to build registry");
    assert_eq!(
        registry.value_by_id(1, true).unwrap(),
        "1,gain,10,10,0..100,int32,dB,Amplifier gain"
    );

    let toml = r#"
[[param]]
id = 1
name = "level"
default = "high"
type = "uint8"
"#;
    let result = ParamCatalog::from_toml_str(toml).and_then(ParamCatalog::into_registry);
    assert!(matches!(result, Err(Error::InvalidValue { .. })));
}

#[test]
fn test_catalog_export_round_trip() {
    let mut registry = ParamCatalog::from_toml_str(CATALOG)
        .and_then(ParamCatalog::into_registry)
        .expect("Failed to build registry");
    registry.set_value_by_name("gain", "33").unwrap();

    let exported = ParamCatalog::from(&registry)
        .to_toml_string()
        .expect("Failed to export catalog");
    let reparsed = ParamCatalog::from_toml_str(&exported).expect("Failed to reparse catalog");

    assert_eq!(reparsed.params(), ParamCatalog::from(&registry).params());
}

#[test]
fn test_catalog_read_from_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("params.toml");
    std::fs::write(&path, CATALOG).expect("Failed to write catalog");

    let catalog = ParamCatalog::read(&path).expect("Failed to read catalog");
    assert_eq!(catalog.params().len(), 2);

    assert!(matches!(
        ParamCatalog::read(temp_dir.path().join("missing.toml")),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_registered_static_params() {
    let registry = ParamRegistry::from_registered().expect("Failed to bind registered params");

    let rate = registry.get_by_name("builtin_rate").expect("Missing builtin_rate");
    assert_eq!(rate.id, 500);
    assert_eq!(rate.value, "50");
    assert_eq!(rate.dimension, "Hz");
    assert_eq!(
        registry.ids().filter(|id| *id >= 500).collect::<Vec<_>>(),
        vec![500, 501]
    );
}

#[derive(Debug, PartialEq, ParamTable)]
#[params(prefix = "motor_")]
struct MotorParams {
    #[param(id = 10, range = "0..100", dimension = "%")]
    max_pwm: u8,
    #[param(id = 11, description = "Reverse the left motor")]
    invert_left: bool,
    #[param(id = 12, name = "slew", dimension = "1/s")]
    slew_rate: f32,
    #[param(id = 13)]
    label: String,
}

impl Default for MotorParams {
    fn default() -> Self {
        Self {
            max_pwm: 80,
            invert_left: false,
            slew_rate: 0.5,
            label: "left".to_string(),
        }
    }
}

#[test]
fn test_derived_table_describes_fields() {
    let motor = MotorParams {
        max_pwm: 60,
        ..MotorParams::default()
    };
    let params = motor.params();

    let summary: Vec<_> = params
        .iter()
        .map(|p| (p.id, p.name.as_str(), p.ty, p.value.as_str(), p.default_value.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (10, "motor_max_pwm", ParamType::Uint8, "60", "80"),
            (11, "motor_invert_left", ParamType::Bool, "false", "false"),
            (12, "slew", ParamType::Float, "0.5", "0.5"),
            (13, "motor_label", ParamType::String, "left", "left"),
        ]
    );
    assert_eq!(params[0].range, "0..100");
    assert_eq!(params[1].description, "Reverse the left motor");
}

#[test]
fn test_derived_table_applies_registry_values() {
    let mut motor = MotorParams::default();
    let mut registry = ParamRegistry::from_params(motor.params()).expect("Failed to bind");

    registry.set_value_by_name("motor_max_pwm", "95").unwrap();
    registry.set_value_by_name("motor_invert_left", "true").unwrap();
    registry.set_value_by_name("slew", "2.25").unwrap();
    registry.set_value_by_name("motor_label", "right").unwrap();
    motor.apply(&registry).expect("Failed to apply");

    assert_eq!(
        motor,
        MotorParams {
            max_pwm: 95,
            invert_left: true,
            slew_rate: 2.25,
            label: "right".to_string(),
        }
    );

    registry.reset_all_to_default().unwrap();
    motor.apply(&registry).expect("Failed to apply");
    assert_eq!(motor, MotorParams::default());
}
