use balloon_simulation::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let show_telemetry = args.iter().any(|arg| arg == "--telemetry");

    let config = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(path) => {
            tracing::info!(path = %path, "loading simulation config");
            SimulationConfig::from_file(path)?
        }
        None => SimulationConfig::default(),
    };

    let range = SweepRange::default();
    println!("Computing ceilings for ground temperatures...");
    let result = run_sweep_parallel(&range, &config);

    for sample in result.iter() {
        println!(
            "  For temperature {:.0}°C, ceiling reached: {:.2} m",
            sample.ground_temperature, sample.peak_altitude
        );
    }

    if let Some(best) = result.ceiling() {
        println!(
            "\nHighest ceiling: {} at {:.0}°C",
            Telemetry::format_altitude(best.peak_altitude),
            best.ground_temperature
        );
    }

    // Detailed flight for the middle of the sweep
    let reference_temperature = 10.0;
    let mut telemetry = Telemetry::new();
    let outcome =
        AscentSimulator::new(&config, reference_temperature).run_with_telemetry(&mut telemetry);
    println!(
        "\nReference flight at {:.0}°C ended with {:?} after {}",
        reference_temperature,
        outcome.termination,
        Telemetry::format_time(outcome.elapsed)
    );
    if show_telemetry {
        telemetry.display_data();
    } else {
        print!("{}", telemetry.summary());
    }

    let balloon = &config.balloon;
    let thermal = &config.thermal;
    println!("\n--- Ceiling Analysis Summary ---");
    println!(
        "Balloon model: diameter {:.2} m, mass {:.0} g",
        balloon.diameter(),
        balloon.mass * 1000.0
    );
    println!(
        "Assumed initial internal temperature: {:.0}°C",
        thermal.initial_temperature_c
    );
    println!("Heat loss coefficient: {}", thermal.heat_loss_coefficient);
    println!(
        "Sagging parameters: onset at {:.0}°C, complete at {:.0}°C, min. volume {:.0}%",
        thermal.sagging_onset_delta_t,
        thermal.sagging_complete_delta_t,
        balloon.min_volume_fraction * 100.0
    );

    Ok(())
}
