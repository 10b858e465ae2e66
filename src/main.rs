mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use fincaops::app::App;
use fincaops::config::Config;
use fincaops::db::PackageStore;
use fincaops::logic::absorption::SystemClock;
use fincaops::logic::irrigation::{IrrigationController, Sensor, SensorKind};
use fincaops::logic::{CropFactory, CropParams, SeasonalAbsorption};
use fincaops::models::{MedicalClearance, Task, Tool, Worker};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEMO_CADASTRAL_ID: u32 = 1001;
const DEMO_PLANTATION: &str = "Experimental Plantation";

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Init => run_init(&cli),
        Commands::Check => run_check(&cli),
        Commands::Demo => run_demo(&cli),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_init(cli: &Cli) -> Result<()> {
    let path = Config::write_default(cli.config.as_ref()).context("Failed to write config")?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

fn run_check(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_ref()).context("Configuration error")?;
    let data_dir = Config::data_dir(cli.data_dir.as_ref())?;
    let store = PackageStore::open(&data_dir)
        .with_context(|| format!("Data directory {} is not usable", data_dir.display()))?;

    let t = &config.irrigation;
    println!("Config: OK");
    println!(
        "  irrigation: {} to {} °C, humidity below {}%",
        t.temp_min, t.temp_max, t.humidity_max
    );
    println!("  default plantation water: {} L", config.farm.default_water);
    println!(
        "  simulation: {} readings every {} ms",
        config.simulation.readings, config.simulation.interval_ms
    );
    println!("Data dir: {}", store.base().display());

    let app = App::new(config, store);
    let kinds: Vec<_> = app
        .registry()
        .registered_kinds()
        .iter()
        .map(|k| k.as_str())
        .collect();
    println!("Registered crop kinds: {}", kinds.join(", "));
    Ok(())
}

fn run_demo(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_ref()).context("Configuration error")?;
    let data_dir = Config::data_dir(cli.data_dir.as_ref())?;
    let store = PackageStore::open(&data_dir)?;
    let mut app = App::new(config, store);

    let land = app
        .farms
        .create_farm(DEMO_CADASTRAL_ID, 50.0, "Route 8 - Km 35", DEMO_PLANTATION)?;
    println!("{}", land);

    let plantings = [
        ("pino", CropParams::new().with("height", 2.5)),
        ("olivo", CropParams::new().with("variety", "Arbequina")),
        ("lechuga", CropParams::new()),
        ("zanahoria", CropParams::new().with("depth", 0.25)),
    ];
    for (kind, params) in &plantings {
        let crop = CropFactory::create(kind, params)
            .with_context(|| format!("Failed to create crop '{}'", kind))?;
        app.farms.plant(DEMO_PLANTATION, crop)?;
    }

    app.farms.water(DEMO_PLANTATION, 10.0)?;
    app.farms
        .water_with(DEMO_PLANTATION, 12.0, &SeasonalAbsorption::new(SystemClock))?;

    // Watering below the conifer minimum is refused as a whole
    if let Err(e) = app.farms.water(DEMO_PLANTATION, 4.0) {
        println!("Watering refused: {}", e);
    }

    let registry = app.registry();
    if let Some(plantation) = app.farms.find_plantation(DEMO_PLANTATION) {
        println!("{}", plantation);
        for crop in plantation.crops() {
            let status = if registry.validate(crop)? { "ok" } else { "check" };
            println!("  [{}] {}", status, registry.display(crop)?);
        }
    }

    let path = app.save_registry("initial_registry")?;
    println!("Saved registry to {}", path.display());

    demo_workers(&mut app)?;
    run_irrigation(&app);

    let path = app.save_registry("final_registry")?;
    println!("Saved registry to {}", path.display());
    Ok(())
}

fn demo_workers(app: &mut App) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut worker = Worker::new("Ana Ruiz", "30111222", 34);
    worker.assign_medical_clearance(MedicalClearance::new(
        today,
        today + chrono::Duration::days(365),
        "Fit for field work",
    ));
    app.workers.register(worker);
    app.workers.assign_task(
        "30111222",
        Task::new("Thin the carrot rows", today, Tool::new("Hoe")),
    )?;

    for w in app.workers.list() {
        println!(
            "Worker {} ({}): fit={}, pending tasks={}",
            w.name,
            w.dni,
            w.is_fit_for_work(today),
            w.pending_tasks().count()
        );
    }
    Ok(())
}

fn run_irrigation(app: &App) {
    let sim = &app.config.simulation;
    let controller = Rc::new(RefCell::new(app.controller()));
    let mut temperature = Sensor::new(SensorKind::Temperature);
    let mut humidity = Sensor::new(SensorKind::Humidity);
    temperature.subscribe(controller.clone());
    humidity.subscribe(controller.clone());

    let mut reader = app.reader();
    for i in 0..sim.readings {
        for sensor in [&mut temperature, &mut humidity] {
            let (value, report) = reader.read(sensor);
            if !report.is_clean() {
                tracing::warn!(
                    sensor = sensor.kind().as_str(),
                    value,
                    failures = report.failures.len(),
                    "Reading not delivered to every listener"
                );
            }
        }
        println!("{}", status_line(&controller.borrow()));

        if i + 1 < sim.readings {
            std::thread::sleep(Duration::from_millis(sim.interval_ms));
        }
    }
}

fn status_line(controller: &IrrigationController) -> String {
    format!("[{}] {}", controller.state(), controller.report_status())
}
