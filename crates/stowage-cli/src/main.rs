// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod profile;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;
use stowage_model::cargo::container::SizeClass;
use stowage_model::prelude::{LoadList, ManifestLoader, VesselGeometry};
use stowage_solver::prelude::{PsoConfig, PsoOptimizer};
use stowage_solver::report;
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Debug)]
struct CliArgs {
    manifest: PathBuf,
    out_dir: PathBuf,
    target_lcg: Option<f64>,
    twenty_to_load: Option<usize>,
    forty_to_load: Option<usize>,
    particles: Option<usize>,
    iterations: Option<usize>,
    seed: Option<u64>,
}

const USAGE: &str = "\
Usage: stowage-cli <manifest.csv> [options]

Options:
  --out <dir>          output directory (default: export)
  --target-lcg <m>     target longitudinal cg; default is the ballast trim
  --twenty <n>         20ft containers to load (default: all in manifest)
  --forty <n>          40ft containers to load (default: all in manifest)
  --particles <n>      swarm size (default: 50)
  --iterations <n>     iteration budget (default: 200)
  --seed <n>           random seed
";

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        manifest: PathBuf::new(),
        out_dir: PathBuf::from("export"),
        target_lcg: None,
        twenty_to_load: None,
        forty_to_load: None,
        particles: None,
        iterations: None,
        seed: None,
    };
    let mut manifest = None;

    while let Some(arg) = args.next() {
        let mut value_for = |name: &str| -> Result<String, String> {
            args.next().ok_or_else(|| format!("{name} needs a value"))
        };
        match arg.as_str() {
            "--out" => parsed.out_dir = PathBuf::from(value_for("--out")?),
            "--target-lcg" => {
                parsed.target_lcg = Some(parse_value(value_for("--target-lcg")?, "--target-lcg")?)
            }
            "--twenty" => {
                parsed.twenty_to_load = Some(parse_value(value_for("--twenty")?, "--twenty")?)
            }
            "--forty" => {
                parsed.forty_to_load = Some(parse_value(value_for("--forty")?, "--forty")?)
            }
            "--particles" => {
                parsed.particles = Some(parse_value(value_for("--particles")?, "--particles")?)
            }
            "--iterations" => {
                parsed.iterations = Some(parse_value(value_for("--iterations")?, "--iterations")?)
            }
            "--seed" => parsed.seed = Some(parse_value(value_for("--seed")?, "--seed")?),
            "--help" | "-h" => return Err(USAGE.to_string()),
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{other}'\n\n{USAGE}"));
            }
            other => {
                if manifest.replace(PathBuf::from(other)).is_some() {
                    return Err(format!("more than one manifest path given\n\n{USAGE}"));
                }
            }
        }
    }

    parsed.manifest = manifest.ok_or_else(|| format!("missing manifest path\n\n{USAGE}"))?;
    Ok(parsed)
}

fn parse_value<T: std::str::FromStr>(raw: String, name: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("invalid value '{raw}' for {name}"))
}

#[derive(Serialize)]
struct RunRecord {
    manifest: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    particles: usize,
    iterations: usize,
    seed: u64,
    target_lcg: f64,
    loaded_twenty: usize,
    loaded_forty: usize,
    dropped: usize,
    fitness: Option<f64>,
    ship_lcg: Option<f64>,
    ship_vcg: Option<f64>,
    ship_tcg: Option<f64>,
    displacement_tons: Option<f64>,
}

fn main() {
    enable_tracing();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let manifest = match ManifestLoader::new().from_path(&args.manifest) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::error!("failed to read manifest {}: {}", args.manifest.display(), e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        containers = manifest.len(),
        "loaded manifest {}",
        args.manifest.display()
    );

    let available = |size: SizeClass| manifest.iter().filter(|c| c.size() == size).count();
    let twenty_target = args
        .twenty_to_load
        .unwrap_or_else(|| available(SizeClass::Twenty));
    let forty_target = args
        .forty_to_load
        .unwrap_or_else(|| available(SizeClass::Forty));

    let load = match LoadList::classify(&manifest, twenty_target, forty_target) {
        Ok(load) => load,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let profile = profile::default_profile();
    let geometry = VesselGeometry::build(&profile);
    tracing::info!(
        twenty_slots = geometry.twenty_slot_count(),
        forty_slots = geometry.forty_slot_count(),
        "vessel geometry ready"
    );

    let condition = profile::default_condition();
    let target_lcg = args.target_lcg.unwrap_or_else(|| {
        let trim = condition.ballast_trim_lcg();
        tracing::info!("no target lcg given, using ballast trim {:.4} m", trim);
        trim
    });

    let mut config = PsoConfig::default();
    if let Some(particles) = args.particles {
        config.particles = particles;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let optimizer = PsoOptimizer::new(&geometry, &load, &condition, target_lcg, config);

    let start_ts = Utc::now();
    let t0 = Instant::now();
    let outcome = optimizer.run();
    let runtime = t0.elapsed();
    let end_ts = Utc::now();

    if let Err(e) = std::fs::create_dir_all(&args.out_dir) {
        tracing::error!("cannot create {}: {}", args.out_dir.display(), e);
        std::process::exit(1);
    }

    let mut record = RunRecord {
        manifest: args.manifest.display().to_string(),
        start_ts,
        end_ts,
        runtime_ms: runtime.as_millis(),
        particles: config.particles,
        iterations: config.iterations,
        seed: config.seed,
        target_lcg,
        loaded_twenty: load.twenty().len(),
        loaded_forty: load.forty().len(),
        dropped: 0,
        fitness: None,
        ship_lcg: None,
        ship_vcg: None,
        ship_tcg: None,
        displacement_tons: None,
    };

    match outcome {
        Some(outcome) => {
            let summary = outcome.summary;
            tracing::info!("total fitness: {:.4}", summary.fitness.value());
            tracing::info!("displacement: {:.2} t", summary.total_weight.tons());
            let lcg_deviation = (summary.ship_lcg - target_lcg).abs();
            tracing::info!(
                "lcg {:.4} m (target {:.4} m): {}",
                summary.ship_lcg,
                target_lcg,
                if lcg_deviation < 1.0 { "ok" } else { "needs adjustment" }
            );
            tracing::info!("vcg {:.4} m", summary.ship_vcg);
            tracing::info!(
                "tcg {:.4} m (limit 0.2 m): {}",
                summary.ship_tcg,
                if summary.ship_tcg.abs() < 0.2 { "ok" } else { "out of limit" }
            );
            if outcome.dropped > 0 {
                tracing::warn!(
                    dropped = outcome.dropped,
                    "plan drops containers beyond slot capacity"
                );
            }

            println!(
                "{}",
                report::render_tier_views(&outcome.plan, &geometry, load.registry())
            );

            record.dropped = outcome.dropped;
            record.fitness = Some(summary.fitness.value());
            record.ship_lcg = Some(summary.ship_lcg);
            record.ship_vcg = Some(summary.ship_vcg);
            record.ship_tcg = Some(summary.ship_tcg);
            record.displacement_tons = Some(summary.total_weight.tons());

            let plan_path = args.out_dir.join("stowage_plan.csv");
            let records = report::plan_records(&outcome.plan, &geometry, load.registry());
            match File::create(&plan_path)
                .and_then(|f| report::write_csv(&records, BufWriter::new(f)))
            {
                Ok(()) => tracing::info!(
                    rows = records.len(),
                    "wrote stowage plan to {}",
                    plan_path.display()
                ),
                Err(e) => {
                    tracing::error!("failed to write {}: {}", plan_path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::error!("search produced no plan");
        }
    }

    let record_path = args.out_dir.join("run_record.json");
    match serde_json::to_string_pretty(&record)
        .map_err(std::io::Error::other)
        .and_then(|json| std::fs::write(&record_path, json))
    {
        Ok(()) => tracing::info!("wrote run record to {}", record_path.display()),
        Err(e) => tracing::error!("failed to write {}: {}", record_path.display(), e),
    }
}
