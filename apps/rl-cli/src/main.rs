use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use rl_app::{
    AppError, AppResult, DEFAULT_TOLERANCE, RunOptions, RunService, compare_with_reference,
    export, loss_breakdown, project_service, segment_table,
};
use rl_core::units::convert::m3ps_to_lps;
use rl_project::{ReferenceDataset, Scenario, SweepDef};
use rl_solver::{PiezometricEvent, piezometric_profile_with, sweep_flow_with};

#[derive(Parser)]
#[command(name = "ridgeline")]
#[command(about = "Ridgeline - steady-state hydraulics of the river-to-plant pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the system and print totals per segment
    Solve(OutputArgs),
    /// Print the full per-segment table
    Segments(OutputArgs),
    /// Print the terrain polyline of the catalog
    Profile {
        /// One vertex per station instead of per segment
        #[arg(long)]
        stations: bool,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Energy and hydraulic grade lines along the route
    Piezometric {
        #[command(flatten)]
        out: OutputArgs,
        /// Sub-points per station (overrides the scenario)
        #[arg(long)]
        sub_points: Option<usize>,
    },
    /// Compare the solve against a reference dataset
    Compare {
        #[command(flatten)]
        out: OutputArgs,
        /// Reference dataset YAML (defaults to the embedded design report)
        #[arg(long)]
        reference: Option<PathBuf>,
        /// Relative tolerance
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
    /// Total power over a range of flow rates
    Sweep {
        #[command(flatten)]
        out: OutputArgs,
        /// First flow rate (m³/s)
        #[arg(long)]
        start: Option<f64>,
        /// Last flow rate (m³/s)
        #[arg(long)]
        end: Option<f64>,
        #[arg(long)]
        points: Option<usize>,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario YAML/JSON file
        scenario_path: PathBuf,
    },
}

#[derive(Args, Clone)]
struct ScenarioArgs {
    /// Scenario YAML/JSON file (defaults to the reference design)
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Flow rate Q (m³/s)
    #[arg(long)]
    flow: Option<f64>,
    /// Inner diameter D (m)
    #[arg(long)]
    diameter: Option<f64>,
    /// Absolute roughness ε (m)
    #[arg(long)]
    roughness: Option<f64>,
    /// Density ρ (kg/m³)
    #[arg(long)]
    density: Option<f64>,
    /// Dynamic viscosity μ (Pa·s)
    #[arg(long)]
    viscosity: Option<f64>,
}

#[derive(Args, Clone)]
struct OutputArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(out) => cmd_solve(&out),
        Commands::Segments(out) => cmd_segments(&out),
        Commands::Profile {
            stations,
            format,
            output,
        } => cmd_profile(stations, format, output.as_deref()),
        Commands::Piezometric { out, sub_points } => cmd_piezometric(&out, sub_points),
        Commands::Compare {
            out,
            reference,
            tolerance,
        } => cmd_compare(&out, reference.as_deref(), tolerance),
        Commands::Sweep {
            out,
            start,
            end,
            points,
        } => cmd_sweep(&out, start, end, points),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
    }
}

fn resolve_scenario(args: &ScenarioArgs) -> AppResult<Scenario> {
    let mut scenario = match &args.scenario {
        Some(path) => project_service::load_scenario(path)?,
        None => Scenario::reference(),
    };

    let fluid = &mut scenario.fluid;
    if let Some(q) = args.flow {
        fluid.flow_m3s = q;
    }
    if let Some(d) = args.diameter {
        fluid.diameter_m = d;
    }
    if let Some(e) = args.roughness {
        fluid.roughness_m = e;
    }
    if let Some(rho) = args.density {
        fluid.density_kgm3 = rho;
    }
    if let Some(mu) = args.viscosity {
        fluid.viscosity_pas = mu;
    }

    project_service::validate_scenario(&scenario)?;
    Ok(scenario)
}

fn run(args: &ScenarioArgs) -> AppResult<(Scenario, rl_app::ScenarioRun)> {
    let scenario = resolve_scenario(args)?;
    let options = RunOptions {
        include_sweep: false,
        ..RunOptions::default()
    };
    let run = RunService::new(scenario.solver.cache_capacity, options).run(&scenario)?;
    Ok((scenario, run))
}

fn csv_string<F>(write: F) -> AppResult<String>
where
    F: FnOnce(&mut Vec<u8>) -> AppResult<()>,
{
    let mut buf = Vec::new();
    write(&mut buf)?;
    String::from_utf8(buf).map_err(|e| AppError::InvalidInput(e.to_string()))
}

fn cmd_solve(out: &OutputArgs) -> AppResult<()> {
    let (scenario, run) = run(&out.scenario)?;
    tracing::info!(scenario = %scenario.name, "solve");

    let content = match out.format {
        Format::Json => export::to_json(run.result.as_ref())?,
        Format::Csv => {
            let rows = segment_table(&run.result);
            csv_string(|buf| export::write_segment_table_csv(buf, &rows))?
        }
        Format::Table => {
            let r = &run.result;
            let mut s = String::new();
            s.push_str(&format!(
                "Scenario: {}\n  Q = {:.2} L/s, D = {:.1} mm, ε = {} m, ρ = {} kg/m³, μ = {} Pa·s\n",
                scenario.name,
                m3ps_to_lps(r.params.flow_m3s),
                r.params.diameter_m * 1000.0,
                r.params.roughness_m,
                r.params.density_kgm3,
                r.params.viscosity_pas,
            ));
            if r.degenerate {
                s.push_str("  (degenerate inputs: all results are zero)\n");
            }
            if let Some(first) = r.segments.first() {
                s.push_str(&format!(
                    "  v = {:.3} m/s, Re = {:.0} ({}), f = {:.6}\n\n",
                    first.velocity_mps,
                    first.reynolds,
                    first.regime,
                    first.friction.colebrook
                ));
            }
            s.push_str("  Seg  Type              St  H/station (m)  H total (m)   P (kW)   P (hp)\n");
            for seg in r.iter() {
                s.push_str(&format!(
                    "  {:>3}  {:<16} {:>3}  {:>13.2}  {:>11.2}  {:>7.2}  {:>7.2}\n",
                    seg.segment.get(),
                    seg.kind.label(),
                    seg.stations,
                    seg.head_per_station_m,
                    seg.total_head_m,
                    seg.hydraulic_power_kw,
                    seg.shaft_power_hp
                ));
            }
            s.push_str(&format!(
                "\n  Total: {:.2} kW ({:.2} hp), {} pump stations, {} throttling stations\n",
                r.totals.hydraulic_power_kw,
                r.totals.shaft_power_hp,
                r.totals.pump_stations,
                r.totals.throttling_stations
            ));
            s
        }
    };
    export::write_output(out.output.as_deref(), &content)
}

fn cmd_segments(out: &OutputArgs) -> AppResult<()> {
    let (_scenario, run) = run(&out.scenario)?;
    let rows = segment_table(&run.result);
    let breakdown = loss_breakdown(&run.result);

    let content = match out.format {
        Format::Json => export::to_json(&rows)?,
        Format::Csv => csv_string(|buf| export::write_segment_table_csv(buf, &rows))?,
        Format::Table => {
            let mut s = String::from(
                "  Seg  Role                     Re        f_CW      f_H       f_SJ      hf (m)   hm (m)   throttled (m)\n",
            );
            for (row, loss) in rows.iter().zip(&breakdown.rows) {
                s.push_str(&format!(
                    "  {:>3}  {:<22}  {:>8.0}  {:.6}  {:.6}  {:.6}  {:>7.2}  {:>7.2}  {:>13.2}\n",
                    row.segment,
                    row.role,
                    row.reynolds,
                    row.f_colebrook,
                    row.f_haaland,
                    row.f_swamee_jain,
                    loss.friction_m,
                    loss.minor_m,
                    loss.throttled_m
                ));
            }
            s.push_str(&format!(
                "\n  Losses: friction {:.2} m, fittings {:.2} m ({:.0}% friction)\n",
                breakdown.totals.friction_m,
                breakdown.totals.minor_m,
                breakdown.friction_share() * 100.0
            ));
            s
        }
    };
    export::write_output(out.output.as_deref(), &content)
}

fn cmd_profile(stations: bool, format: Format, output: Option<&Path>) -> AppResult<()> {
    let content = if stations {
        let points = rl_topology::station_profile();
        match format {
            Format::Json => export::to_json(&points)?,
            Format::Csv => csv_string(|buf| export::write_stations_csv(buf, &points))?,
            Format::Table => {
                let mut s = String::from("  Seg  Stn   Distance (m)  Elevation (m)\n");
                for p in &points {
                    s.push_str(&format!(
                        "  {:>3}  {:>3}  {:>13.1}  {:>13.1}\n",
                        p.segment.get(),
                        p.station,
                        p.distance_m,
                        p.elevation_m
                    ));
                }
                s
            }
        }
    } else {
        let points = rl_topology::cumulative_profile();
        match format {
            Format::Json => export::to_json(&points)?,
            Format::Csv => csv_string(|buf| export::write_terrain_csv(buf, &points))?,
            Format::Table => {
                let mut s = String::from("  Seg   Distance (m)  Elevation (m)\n");
                for p in &points {
                    let segment = p
                        .segment
                        .map(|id| id.get().to_string())
                        .unwrap_or_else(|| "-".to_string());
                    s.push_str(&format!(
                        "  {:>3}  {:>13.1}  {:>13.1}\n",
                        segment, p.distance_m, p.elevation_m
                    ));
                }
                s
            }
        }
    };
    export::write_output(output, &content)
}

fn cmd_piezometric(out: &OutputArgs, sub_points: Option<usize>) -> AppResult<()> {
    let (scenario, run) = run(&out.scenario)?;
    let profile = match sub_points {
        Some(n) => piezometric_profile_with(&run.result, n),
        None => run.profile,
    };
    tracing::info!(scenario = %scenario.name, points = profile.points.len(), "piezometric profile");

    let content = match out.format {
        Format::Json => export::to_json(&profile)?,
        Format::Csv => csv_string(|buf| export::write_piezometric_csv(buf, &profile))?,
        Format::Table => {
            let mut s = String::new();
            for event in &profile.events {
                let line = match *event {
                    PiezometricEvent::Pump {
                        segment,
                        station,
                        distance_m,
                        egl_before_m,
                        egl_after_m,
                        head_m,
                    } => format!(
                        "  {:>8.1} m  pump        seg {segment}/{station}  EGL {egl_before_m:.1} -> {egl_after_m:.1} m  (+{head_m:.2} m)\n",
                        distance_m
                    ),
                    PiezometricEvent::BreakTank {
                        segment,
                        station,
                        distance_m,
                        egl_after_m,
                        dissipated_m,
                        ..
                    } => format!(
                        "  {:>8.1} m  break tank  seg {segment}/{station}  EGL -> {egl_after_m:.1} m  (-{dissipated_m:.2} m)\n",
                        distance_m
                    ),
                    PiezometricEvent::GravityFeed {
                        segment,
                        station,
                        distance_m,
                        pressure_head_m,
                        ..
                    } => format!(
                        "  {:>8.1} m  gravity     seg {segment}/{station}  available {pressure_head_m:.2} m\n",
                        distance_m
                    ),
                };
                s.push_str(&line);
            }
            if let Some(min) = profile.min_pressure_head() {
                s.push_str(&format!(
                    "\n  Minimum pressure head: {:.2} m at {:.1} m\n",
                    min.pressure_head_m, min.distance_m
                ));
            }
            s
        }
    };
    export::write_output(out.output.as_deref(), &content)
}

fn cmd_compare(out: &OutputArgs, reference: Option<&Path>, tolerance: f64) -> AppResult<()> {
    let (_scenario, run) = run(&out.scenario)?;
    let dataset = match reference {
        Some(path) => ReferenceDataset::load_yaml(path)?,
        None => ReferenceDataset::builtin()?,
    };
    let report = compare_with_reference(&run.result, &dataset, tolerance)?;

    let content = match out.format {
        Format::Json => export::to_json(&report)?,
        Format::Csv => csv_string(|buf| export::write_comparison_csv(buf, &report))?,
        Format::Table => {
            let mut s = format!(
                "Reference: {} (tolerance {:.1}%)\n",
                report.dataset,
                report.tolerance * 100.0
            );
            for e in &report.entries {
                let segment = e
                    .segment
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "-".to_string());
                s.push_str(&format!(
                    "  {:>3}  {:<20} {:>12.4} {:>12.4} {:>+8.2}%  {}\n",
                    segment,
                    e.quantity,
                    e.computed,
                    e.reference,
                    e.deviation * 100.0,
                    if e.within_tolerance { "ok" } else { "DIFF" }
                ));
            }
            for index in &report.kind_mismatches {
                s.push_str(&format!("  segment {index}: equipment kind differs\n"));
            }
            s.push_str(if report.passed() {
                "\n✓ Matches reference\n"
            } else {
                "\n✗ Deviations above tolerance\n"
            });
            s
        }
    };
    export::write_output(out.output.as_deref(), &content)
}

fn cmd_sweep(
    out: &OutputArgs,
    start: Option<f64>,
    end: Option<f64>,
    points: Option<usize>,
) -> AppResult<()> {
    let scenario = resolve_scenario(&out.scenario)?;
    let base = scenario.sweep.unwrap_or_default();
    let sweep = SweepDef {
        start_m3s: start.unwrap_or(base.start_m3s),
        end_m3s: end.unwrap_or(base.end_m3s),
        points: points.unwrap_or(base.points),
    };

    let runtime = rl_app::compile_scenario(&scenario);
    let rows = sweep_flow_with(
        &runtime.params,
        sweep.start_m3s,
        sweep.end_m3s,
        sweep.points,
        &runtime.config,
    )?;
    tracing::info!(points = rows.len(), "flow sweep");

    let content = match out.format {
        Format::Json => export::to_json(&rows)?,
        Format::Csv => csv_string(|buf| export::write_sweep_csv(buf, &rows))?,
        Format::Table => {
            let mut s = String::from("  Q (L/s)   P (kW)    P (hp)    H pumps (m)\n");
            for r in &rows {
                s.push_str(&format!(
                    "  {:>7.2}  {:>7.2}  {:>8.2}  {:>12.2}\n",
                    m3ps_to_lps(r.flow_m3s),
                    r.total_power_kw,
                    r.total_power_hp,
                    r.total_head_m
                ));
            }
            s
        }
    };
    export::write_output(out.output.as_deref(), &content)
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = project_service::load_scenario(scenario_path)?;
    project_service::validate_scenario(&scenario)?;
    let summary = project_service::summarize(&scenario);
    println!(
        "✓ Scenario '{}' is valid (Q = {:.2} L/s, D = {:.1} mm{})",
        summary.name,
        summary.flow_lps,
        summary.diameter_mm,
        if summary.has_sweep { ", with sweep" } else { "" }
    );
    Ok(())
}
