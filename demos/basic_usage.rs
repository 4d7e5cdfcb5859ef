use next_params::{ParamRegistry, ParamTable, error::Error};

/// Tuning values for a simple rover drive train.
#[derive(Debug, Default, ParamTable)]
#[params(prefix = "drive_")]
struct DriveParams {
    #[param(id = 1, range = "0..100", dimension = "%", description = "Throttle cap")]
    max_throttle: u8,
    #[param(id = 2, range = "0..10", dimension = "1/s")]
    steer_gain: f32,
    #[param(id = 3, description = "Swap left and right motors")]
    swap_motors: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let temp_dir = tempfile::tempdir()?;
    let param_file = temp_dir.path().join("drive.param");

    let mut drive = DriveParams::default();
    let mut registry = ParamRegistry::from_params(drive.params())?;

    // Bind counts as a change to everything; a consumer would push all
    // values to the hardware once and then drain.
    println!("Initial changes: {:?}", registry.take_pending_changes());

    registry.set_value_by_name("drive_max_throttle", "75")?;
    registry.set_value_by_name("drive_steer_gain", " 1.5 ")?;

    // Rejected writes leave the value alone
    match registry.set_value_by_name("drive_swap_motors", "maybe") {
        Ok(()) => println!("Update succeeded"),
        Err(e) => println!("Update failed (expected): {}", e),
    }

    if registry.has_pending_changes() {
        for id in registry.take_pending_changes() {
            println!("Changed: {}", registry.value_by_id(id, true)?);
        }
        drive.apply(&registry)?;
    }
    println!("{:#?}", drive);

    registry.save(&param_file)?;

    // A fresh registry picks the saved values back up
    let mut fresh = ParamRegistry::from_params(DriveParams::default().params())?;
    fresh.load(&param_file)?;
    println!(
        "Reloaded throttle: {}",
        fresh.value_by_name("drive_max_throttle", false)?
    );

    match fresh.save(temp_dir.path().join("drive.txt")) {
        Err(Error::BadExtension { path }) => println!("Refused to save {}", path.display()),
        other => println!("Unexpected: {:?}", other),
    }

    Ok(())
}
