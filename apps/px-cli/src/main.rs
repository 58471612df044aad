use clap::{Args, Parser, Subcommand};
use px_air::{FlowState, MoistAirState};
use px_core::units::{celsius, kgps, pa, watts};
use px_process::{cooling, heating, Coolant, ProcessResult};

#[derive(Parser)]
#[command(name = "px-cli")]
#[command(about = "Psychroflow CLI - moist air properties and HVAC process calculations", long_about = None)]
struct Cli {
    /// Raise log verbosity (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AirArgs {
    /// Absolute pressure [Pa]
    #[arg(long, default_value_t = 101_325.0)]
    pressure: f64,
    /// Dry-bulb temperature [degC]
    #[arg(long)]
    temperature: f64,
    /// Relative humidity [%]
    #[arg(long, conflicts_with = "humidity_ratio")]
    rh: Option<f64>,
    /// Humidity ratio [kg/kg]
    #[arg(long)]
    humidity_ratio: Option<f64>,
}

#[derive(Args)]
struct FlowArgs {
    #[command(flatten)]
    air: AirArgs,
    /// Dry-air mass flow [kg/s]
    #[arg(long, default_value_t = 1.0)]
    flow: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate and print a moist-air state
    State {
        #[command(flatten)]
        air: AirArgs,
    },
    /// Sensible heating process
    Heat {
        #[command(flatten)]
        flow: FlowArgs,
        /// Target outlet temperature [degC]
        #[arg(long, conflicts_with_all = ["to_rh", "power"])]
        to_temp: Option<f64>,
        /// Target outlet relative humidity [%]
        #[arg(long)]
        to_rh: Option<f64>,
        /// Heating power [W]
        #[arg(long)]
        power: Option<f64>,
    },
    /// Cooling-coil process
    Cool {
        #[command(flatten)]
        flow: FlowArgs,
        /// Coolant supply temperature [degC]
        #[arg(long, default_value_t = 7.0)]
        coolant_supply: f64,
        /// Coolant return temperature [degC]
        #[arg(long, default_value_t = 12.0)]
        coolant_return: f64,
        /// Target outlet temperature [degC]
        #[arg(long, conflicts_with_all = ["to_rh", "load"])]
        to_temp: Option<f64>,
        /// Target outlet relative humidity [%]
        #[arg(long)]
        to_rh: Option<f64>,
        /// Cooling heat load [W, negative]
        #[arg(long)]
        load: Option<f64>,
    },
}

fn build_state(air: &AirArgs) -> Result<MoistAirState, Box<dyn std::error::Error>> {
    let p = pa(air.pressure);
    let t = celsius(air.temperature);
    let state = match (air.rh, air.humidity_ratio) {
        (_, Some(x)) => MoistAirState::from_humidity_ratio(p, t, x)?,
        (Some(rh), None) => MoistAirState::from_relative_humidity(p, t, rh)?,
        (None, None) => MoistAirState::from_relative_humidity(p, t, 50.0)?,
    };
    Ok(state)
}

fn print_state(state: &MoistAirState) {
    println!("Pressure              {:>12.1} Pa", state.pressure().value);
    println!("Dry-bulb temperature  {:>12.3} degC", state.temperature_c());
    println!(
        "Relative humidity     {:>12.3} %",
        state.relative_humidity()
    );
    println!("Humidity ratio        {:>12.6} kg/kg", state.humidity_ratio());
    println!(
        "Saturation pressure   {:>12.1} Pa",
        state.saturation_pressure().value
    );
    println!("Dew point             {:>12.3} degC", state.dew_point_c());
    println!("Wet bulb              {:>12.3} degC", state.wet_bulb_c());
    println!("Density               {:>12.4} kg/m3", state.density().value);
    println!(
        "Specific enthalpy     {:>12.3} kJ/kg",
        state.specific_enthalpy()
    );
    println!(
        "Specific heat         {:>12.4} kJ/(kg K)",
        state.specific_heat()
    );
    println!(
        "Dynamic viscosity     {:>12.3e} Pa s",
        state.dynamic_viscosity()
    );
    println!(
        "Thermal conductivity  {:>12.4} W/(m K)",
        state.thermal_conductivity()
    );
}

fn print_result(result: &ProcessResult) {
    println!("--- outlet ---");
    print_state(result.outlet.state());
    println!("--- process ---");
    println!("Heat of process       {:>12.3} kW", result.heat.value / 1e3);
    if let Some(bf) = result.bypass_factor {
        println!("Bypass factor         {:>12.4}", bf);
    }
    if let Some(wall) = result.wall_temperature {
        println!(
            "Wall temperature      {:>12.3} degC",
            px_core::units::to_celsius(wall)
        );
    }
    match &result.condensate {
        Some(condensate) => println!(
            "Condensate            {:>12.6} kg/s at {:.2} degC",
            condensate.mass_flow().value,
            condensate.state().temperature_c()
        ),
        None => println!("Condensate                    none"),
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::State { air } => {
            let state = build_state(&air)?;
            print_state(&state);
        }
        Commands::Heat {
            flow,
            to_temp,
            to_rh,
            power,
        } => {
            let state = build_state(&flow.air)?;
            let inlet = FlowState::from_dry_air_flow(state, kgps(flow.flow))?;
            let result = match (to_temp, to_rh, power) {
                (Some(t), _, _) => heating::to_temperature(&inlet, celsius(t))?,
                (_, Some(rh), _) => heating::to_relative_humidity(&inlet, rh)?,
                (_, _, Some(q)) => heating::from_power(&inlet, watts(q))?,
                _ => return Err("specify one of --to-temp, --to-rh, --power".into()),
            };
            print_result(&result);
        }
        Commands::Cool {
            flow,
            coolant_supply,
            coolant_return,
            to_temp,
            to_rh,
            load,
        } => {
            let state = build_state(&flow.air)?;
            let inlet = FlowState::from_dry_air_flow(state, kgps(flow.flow))?;
            let coolant = Coolant::new(celsius(coolant_supply), celsius(coolant_return))?;
            let result = match (to_temp, to_rh, load) {
                (Some(t), _, _) => cooling::to_temperature(&inlet, &coolant, celsius(t))?,
                (_, Some(rh), _) => cooling::to_relative_humidity(&inlet, &coolant, rh)?,
                (_, _, Some(q)) => cooling::from_heat_load(&inlet, &coolant, watts(q))?,
                _ => return Err("specify one of --to-temp, --to-rh, --load".into()),
            };
            print_result(&result);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
