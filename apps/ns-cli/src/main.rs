mod config;
mod error;

use clap::{Parser, Subcommand};
use config::{BoundaryDef, ModelDef, RunFile, SolverKind, load_run_file};
use error::{CliError, CliResult};
use ns_core::{EosTable, PhysicsConstants};
use ns_rmf::{CoreEos, RmfParams, SweepOptions, compute_eos_with};
use ns_solver::{DampedNewton, LevenbergMarquardt, NonlinearSolver};
use ns_sos::{Admissibility, SpeedOfSoundEos};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ns-cli")]
#[command(about = "Neutron-star equation-of-state generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run file
    Check {
        /// Path to the run YAML file
        run_path: PathBuf,
    },
    /// Solve the RMF model and print the core table above the crust
    Rmf {
        /// Path to the run YAML file
        run_path: PathBuf,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// Build a speed-of-sound core from a unit-cube point
    Sos {
        /// Path to the run YAML file
        run_path: PathBuf,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { run_path } => cmd_check(&run_path),
        Commands::Rmf {
            run_path,
            output,
            json,
        } => cmd_rmf(&run_path, output.as_deref(), json),
        Commands::Sos {
            run_path,
            output,
            json,
        } => cmd_sos(&run_path, output.as_deref(), json),
    }
}

fn cmd_check(run_path: &Path) -> CliResult<()> {
    println!("Validating run file: {}", run_path.display());
    let run = load_run_file(run_path)?;
    let kind = match run.model {
        ModelDef::Rmf { .. } => "rmf",
        ModelDef::SpeedOfSound { .. } => "speed_of_sound",
    };
    println!("✓ Run '{}' is valid ({} model)", run.name, kind);
    Ok(())
}

fn cmd_rmf(run_path: &Path, output: Option<&Path>, json: bool) -> CliResult<()> {
    let run = load_run_file(run_path)?;
    let core = run_rmf(&run)?;

    let unconverged = core.diagnostics.iter().filter(|d| !d.converged).count();
    eprintln!(
        "✓ RMF core: {} rows from grid index {} ({} unconverged solves)",
        core.table.len(),
        core.start_index,
        unconverged
    );
    write_table(&core.table, output, json)
}

fn run_rmf(run: &RunFile) -> CliResult<CoreEos> {
    let ModelDef::Rmf {
        theta,
        solver,
        options,
    } = &run.model
    else {
        return Err(CliError::Validation("run file does not hold an rmf model".into()));
    };
    let crust = run
        .crust
        .as_ref()
        .ok_or_else(|| CliError::Validation("rmf model needs a crust table".into()))?;

    let params = RmfParams::from_slice(theta)?;
    let options = (*options).map(SweepOptions::from).unwrap_or_default();
    let backend: Box<dyn NonlinearSolver> = match solver {
        SolverKind::LevenbergMarquardt => Box::new(LevenbergMarquardt::default()),
        SolverKind::Newton => Box::new(DampedNewton::default()),
    };
    tracing::info!(solver = backend.name(), ?options, "starting RMF sweep");

    Ok(compute_eos_with(crust, &params, backend.as_ref(), &options)?)
}

fn cmd_sos(run_path: &Path, output: Option<&Path>, json: bool) -> CliResult<()> {
    let run = load_run_file(run_path)?;
    let ModelDef::SpeedOfSound {
        boundary,
        cube,
        pt_check,
        x_end,
        points,
    } = &run.model
    else {
        return Err(CliError::Validation(
            "run file does not hold a speed_of_sound model".into(),
        ));
    };

    let constants = PhysicsConstants::STANDARD;
    let model = match (boundary, &run.crust) {
        (Some(BoundaryDef {
            x_last,
            y_last,
            dydx_last,
        }), _) => SpeedOfSoundEos::new(*x_last, *y_last, *dydx_last, *pt_check),
        (None, Some(crust)) => SpeedOfSoundEos::from_outer_table(crust, *pt_check, &constants)?,
        (None, None) => {
            return Err(CliError::Validation(
                "speed_of_sound model needs a boundary or a crust table".into(),
            ));
        }
    };

    let a = model.gen_a(cube)?;
    let verdict = model.classify_a(&a);
    eprintln!(
        "a = [{:.6}, {:.6}, {:.6}, {:.6}, {:.6}, {:.6}]",
        a.a1, a.a2, a.a3, a.a4, a.a5, a.a6
    );
    if verdict == Admissibility::Admissible {
        eprintln!("✓ Parameters admissible");
    } else {
        eprintln!("✗ Parameters rejected: {:?}", verdict);
    }

    let table = model.core_table(*x_end, *points, &a, &constants)?;
    write_table(&table, output, json)
}

fn render_csv(table: &EosTable) -> String {
    let mut csv = String::from("energy_density_g_cm3,pressure_dyn_cm2\n");
    for (e, p) in table.energy_density.iter().zip(&table.pressure) {
        csv.push_str(&format!("{:e},{:e}\n", e, p));
    }
    csv
}

fn write_table(table: &EosTable, output: Option<&Path>, json: bool) -> CliResult<()> {
    let body = if json {
        serde_json::to_string_pretty(table)?
    } else {
        render_csv(table)
    };

    if let Some(path) = output {
        std::fs::write(path, body).map_err(|source| CliError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        eprintln!("✓ Wrote {} rows to {}", table.len(), path.display());
    } else {
        print!("{}", body);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_header_and_rows() {
        let table = EosTable::new(vec![1.0e14, 2.0e14], vec![1.0e33, 3.0e33]).unwrap();
        let csv = render_csv(&table);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "energy_density_g_cm3,pressure_dyn_cm2");
        assert_eq!(lines[1], "1e14,1e33");
    }

    #[test]
    fn rmf_requires_rmf_model() {
        let run = config::parse_run_file(
            "version: 1\nname: s\nmodel:\n  type: speed_of_sound\n  boundary: { x_last: 1.0, y_last: 0.01, dydx_last: 0.05 }\n  cube: [0.5, 0.5, 0.5, 0.5, 0.5]\n",
        )
        .unwrap();
        assert!(matches!(run_rmf(&run), Err(CliError::Validation(_))));
    }
}
