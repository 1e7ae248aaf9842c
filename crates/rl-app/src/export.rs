//! CSV and JSON writers for plotting tools.

use std::io::Write;
use std::path::Path;

use rl_solver::{PiezometricProfile, SweepPoint};
use rl_topology::{ProfilePoint, StationPoint};
use serde::Serialize;

use crate::compare::ComparisonReport;
use crate::error::{AppError, AppResult};
use crate::query::{LossBreakdown, SegmentRow};

pub fn write_segment_table_csv<W: Write>(out: &mut W, rows: &[SegmentRow]) -> AppResult<()> {
    writeln!(
        out,
        "segment,role,kind,stations,pipe_length_m,elevation_change_m,velocity_mps,reynolds,regime,\
         f_colebrook,f_haaland,f_swamee_jain,head_per_station_m,total_head_m,throttled_head_m,\
         power_kw,power_hp"
    )?;
    for r in rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            r.segment,
            r.role,
            r.kind,
            r.stations,
            r.pipe_length_m,
            r.elevation_change_m,
            r.velocity_mps,
            r.reynolds,
            r.regime,
            r.f_colebrook,
            r.f_haaland,
            r.f_swamee_jain,
            r.head_per_station_m,
            r.total_head_m,
            r.throttled_head_m,
            r.power_kw,
            r.power_hp
        )?;
    }
    Ok(())
}

pub fn write_loss_breakdown_csv<W: Write>(out: &mut W, breakdown: &LossBreakdown) -> AppResult<()> {
    writeln!(out, "segment,elevation_m,friction_m,friction_haaland_m,minor_m,throttled_m")?;
    for r in &breakdown.rows {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            r.segment, r.elevation_m, r.friction_m, r.friction_haaland_m, r.minor_m, r.throttled_m
        )?;
    }
    let t = &breakdown.totals;
    writeln!(
        out,
        "total,{},{},{},{},{}",
        t.elevation_m, t.friction_m, t.friction_haaland_m, t.minor_m, t.throttled_m
    )?;
    Ok(())
}

pub fn write_terrain_csv<W: Write>(out: &mut W, points: &[ProfilePoint]) -> AppResult<()> {
    writeln!(out, "distance_m,elevation_m,segment")?;
    for p in points {
        let segment = p.segment.map(|s| s.to_string()).unwrap_or_default();
        writeln!(out, "{},{},{}", p.distance_m, p.elevation_m, segment)?;
    }
    Ok(())
}

pub fn write_stations_csv<W: Write>(out: &mut W, points: &[StationPoint]) -> AppResult<()> {
    writeln!(out, "segment,station,distance_m,elevation_m")?;
    for p in points {
        writeln!(
            out,
            "{},{},{},{}",
            p.segment, p.station, p.distance_m, p.elevation_m
        )?;
    }
    Ok(())
}

pub fn write_piezometric_csv<W: Write>(out: &mut W, profile: &PiezometricProfile) -> AppResult<()> {
    writeln!(
        out,
        "distance_m,elevation_m,egl_m,hgl_m,pressure_head_m,segment,station"
    )?;
    for p in &profile.points {
        let segment = p.segment.map(|s| s.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            p.distance_m, p.elevation_m, p.egl_m, p.hgl_m, p.pressure_head_m, segment, p.station
        )?;
    }
    Ok(())
}

pub fn write_sweep_csv<W: Write>(out: &mut W, rows: &[SweepPoint]) -> AppResult<()> {
    writeln!(
        out,
        "flow_m3s,total_power_kw,total_power_hp,total_head_m,reynolds,friction_factor"
    )?;
    for r in rows {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            r.flow_m3s,
            r.total_power_kw,
            r.total_power_hp,
            r.total_head_m,
            r.reynolds,
            r.friction_factor
        )?;
    }
    Ok(())
}

/// One row per compared quantity. Equipment kind mismatches follow as
/// `kind` rows with empty figures.
pub fn write_comparison_csv<W: Write>(out: &mut W, report: &ComparisonReport) -> AppResult<()> {
    writeln!(out, "segment,quantity,computed,reference,deviation,within_tolerance")?;
    for e in &report.entries {
        let segment = e.segment.map(|s| s.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{}",
            segment, e.quantity, e.computed, e.reference, e.deviation, e.within_tolerance
        )?;
    }
    for index in &report.kind_mismatches {
        writeln!(out, "{index},kind,,,,false")?;
    }
    Ok(())
}

/// Pretty JSON of any serialisable output.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write rendered output to `path`, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> AppResult<()> {
    match path {
        Some(path) => std::fs::write(path, content).map_err(|e| AppError::OutputFileWrite {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            Ok(())
        }
    }
}
