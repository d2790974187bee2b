//! CLI command implementations.

use std::error::Error;
use std::time::Instant;

use weft_driver::{Driver, DriverConfig, IntervalScheduler, RunMetrics};
use weft_mesh::ClothMesh;
use weft_render::PixelCanvas;
use weft_telemetry::TracingSink;

type CmdResult = Result<(), Box<dyn Error>>;

/// Arguments for [`run`].
pub struct RunArgs<'a> {
    pub config: Option<&'a str>,
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    pub output: &'a str,
    pub seed: Option<u64>,
    pub realtime: bool,
    pub mesh_out: Option<&'a str>,
    pub telemetry: bool,
}

fn load_config(path: Option<&str>) -> Result<DriverConfig, Box<dyn Error>> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            DriverConfig::from_toml(&content)?
        }
        None => DriverConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Parses `WIDTHxHEIGHT`.
fn parse_size(text: &str) -> Result<(u32, u32), Box<dyn Error>> {
    let (w, h) = text
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid size '{text}', expected WIDTHxHEIGHT"))?;
    Ok((w.trim().parse()?, h.trim().parse()?))
}

/// Run the effect headless and save the last frame.
pub fn run(args: RunArgs<'_>) -> CmdResult {
    let mut config = load_config(args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    println!("weft run");
    println!("────────");
    println!("Surface:   {}x{}", args.width, args.height);
    println!("Frames:    {}", args.frames);
    println!("Pacing:    {}", if args.realtime { "realtime" } else { "simulated" });
    println!();

    let mut driver = Driver::mount(PixelCanvas::new(args.width, args.height), config)?;
    if args.telemetry {
        driver = driver.with_sink(Box::new(TracingSink::new()));
    }

    let start = Instant::now();
    let frames_run = if args.realtime {
        driver.start()?;
        let mut scheduler =
            IntervalScheduler::from_rate(driver.config().frame_rate).with_limit(args.frames);
        driver.run(&mut scheduler)
    } else {
        driver.start_without_timer()?;
        driver.run_frames(args.frames).len() as u64
    };
    let elapsed = start.elapsed().as_secs_f64();

    let mesh = driver.mesh();
    println!("Grid:        {}x{}", mesh.layout.cols, mesh.layout.rows);
    println!("Particles:   {} ({} anchored)", mesh.particle_count(), mesh.anchored_count());
    println!("Springs:     {}", mesh.spring_count());
    println!("Frames run:  {frames_run} in {elapsed:.3}s");
    println!("Live gusts:  {}", driver.sim().wind().len());
    println!("Final KE:    {:.6e}", driver.sim().kinetic_energy());
    println!("Max strain:  {:.4}", mesh.max_strain());

    if let Some(path) = args.mesh_out {
        std::fs::write(path, serde_json::to_string_pretty(mesh)?)?;
        println!("Mesh written to: {path}");
    }

    let canvas = driver.unmount()?;
    canvas.save_png(args.output)?;
    println!("Frame written to: {}", args.output);
    Ok(())
}

/// Time the frame loop for each surface size.
pub fn bench(
    config_path: Option<&str>,
    frames: u64,
    sizes: &[String],
    output_path: Option<&str>,
) -> CmdResult {
    let mut config = load_config(config_path)?;
    if config.seed.is_none() {
        config.seed = Some(0);
    }

    println!("weft Benchmark");
    println!("══════════════");
    println!();

    let mut all_metrics = Vec::new();
    for size in sizes {
        let (width, height) = parse_size(size)?;
        let mut driver = Driver::mount(PixelCanvas::new(width, height), config.clone())?;
        driver.start_without_timer()?;

        println!(
            "Running: {size} ({} particles, {} springs, {frames} frames)",
            driver.mesh().particle_count(),
            driver.mesh().spring_count(),
        );

        let metrics = RunMetrics::measure(size, &mut driver, frames);
        driver.unmount()?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Avg render:    {:.3}ms", metrics.avg_render_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max strain:    {:.4}", metrics.max_strain);
        println!();

        all_metrics.push(metrics);
    }

    let csv = RunMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }
    Ok(())
}

/// Validate a config or a mesh dump.
pub fn validate(path: &str) -> CmdResult {
    println!("weft Validator");
    println!("──────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config = DriverConfig::from_toml(&content)?;
        match config.validate() {
            Ok(()) => println!("✅ Config is valid."),
            Err(e) => {
                println!("❌ Config validation failed: {e}");
                return Err(e.into());
            }
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: ClothMesh = serde_json::from_str(&content)?;
        match mesh.validate() {
            Ok(()) => println!(
                "✅ Mesh is valid ({} particles, {} springs).",
                mesh.particle_count(),
                mesh.spring_count()
            ),
            Err(e) => {
                println!("❌ Mesh validation failed: {e}");
                return Err(e.into());
            }
        }
    } else {
        return Err("Unsupported file format. Use .toml (config) or .json (mesh).".into());
    }

    Ok(())
}

/// Print the default config.
pub fn print_config() -> CmdResult {
    print!("{}", DriverConfig::default().to_toml()?);
    Ok(())
}
