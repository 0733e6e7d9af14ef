//! Integrates the temperature and velocity of a cloud of parcels.
//!
//! Each parcel exchanges heat with the carrier gas and radiates, and is
//! accelerated by drag and gravity. The schemes are chosen per variable from
//! the configuration below.
//!
//! ```text
//! cargo run -p ratestep-schemes --example parcel
//! ```

use std::error::Error;

use log::{LevelFilter, info};
use nalgebra::Vector3;
use ratestep_core::{Contribution, Scheme, Staging};
use ratestep_schemes::{IntegrationSchemes, registry};
use serde::Deserialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

const CONFIG: &str = r#"
    dt = 1e-3
    steps = 500

    [carrier]
    temperature = 600.0
    velocity = [2.0, 0.0, 0.0]

    [integration_schemes]
    temperature = "analytical"
    velocity = { scheme = "theta", theta = 1.0 }
"#;

#[derive(Debug, Deserialize)]
struct Carrier {
    temperature: f64,
    velocity: [f64; 3],
}

#[derive(Debug, Deserialize)]
struct Settings {
    dt: f64,
    steps: usize,
    carrier: Carrier,
    integration_schemes: IntegrationSchemes,
}

#[derive(Debug, Clone)]
struct Parcel {
    diameter: f64,
    temperature: f64,
    velocity: Vector3<f64>,
}

impl Parcel {
    /// Inverse relaxation time for momentum, Stokes drag.
    fn drag_rate(&self) -> f64 {
        const GAS_VISCOSITY: f64 = 1.8e-5;
        const PARCEL_DENSITY: f64 = 1000.0;
        18.0 * GAS_VISCOSITY / (PARCEL_DENSITY * self.diameter.powi(2))
    }

    /// Inverse relaxation time for heat transfer, Nusselt number of two.
    fn heat_rate(&self) -> f64 {
        const GAS_CONDUCTIVITY: f64 = 0.026;
        const PARCEL_DENSITY: f64 = 1000.0;
        const HEAT_CAPACITY: f64 = 4180.0;
        12.0 * GAS_CONDUCTIVITY / (PARCEL_DENSITY * HEAT_CAPACITY * self.diameter.powi(2))
    }
}

fn advance(
    parcel: &mut Parcel,
    carrier: &Carrier,
    temperature_scheme: &dyn Scheme,
    velocity_scheme: &dyn Scheme,
    dt: f64,
) -> Result<(), Box<dyn Error>> {
    // Linearized radiative loss towards a cold environment.
    let radiation = Contribution::new(0.0, 1e-3);
    let convection = Contribution::new(
        parcel.heat_rate() * carrier.temperature,
        parcel.heat_rate(),
    );
    let heat = [convection, radiation];
    let change = Staging::new(temperature_scheme, &parcel.temperature, dt, &heat)?.total();
    parcel.temperature += change;

    let carrier_velocity = Vector3::from(carrier.velocity);
    let drag = Contribution::new(carrier_velocity * parcel.drag_rate(), parcel.drag_rate());
    let gravity = Contribution::new(Vector3::new(0.0, 0.0, -9.81), 0.0);
    let forces = [drag, gravity];
    let change = Staging::new(velocity_scheme, &parcel.velocity, dt, &forces)?.total();
    parcel.velocity += change;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let settings: Settings = toml::from_str(CONFIG)?;
    let schemes = &settings.integration_schemes;
    let temperature_scheme = schemes.select(registry::global(), "temperature")?;
    let velocity_scheme = schemes.select(registry::global(), "velocity")?;

    let mut parcels: Vec<Parcel> = [20e-6, 50e-6, 100e-6]
        .into_iter()
        .map(|diameter| Parcel {
            diameter,
            temperature: 300.0,
            velocity: Vector3::zeros(),
        })
        .collect();

    for _ in 0..settings.steps {
        for parcel in &mut parcels {
            advance(
                parcel,
                &settings.carrier,
                temperature_scheme.as_ref(),
                velocity_scheme.as_ref(),
                settings.dt,
            )?;
        }
    }

    let elapsed = settings.dt * settings.steps as f64;
    for parcel in &parcels {
        info!(
            "d = {:.0} um after {elapsed} s: T = {:.2} K, u = [{:.3}, {:.3}, {:.3}] m/s",
            parcel.diameter * 1e6,
            parcel.temperature,
            parcel.velocity.x,
            parcel.velocity.y,
            parcel.velocity.z,
        );
    }

    Ok(())
}
