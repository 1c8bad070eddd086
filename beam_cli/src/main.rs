//! # Beam CLI Application
//!
//! Command-line front end for `beam_core`. Builds a beam and a load from flags
//! (or reads an analysis request file), runs the analysis and prints a text
//! summary. `--json` prints the structured result for scripting and LLM use.
//!
//! ```text
//! beam_cli solve --length 10 --load point --magnitude 100 --position 0.5
//! beam_cli influence --support fixed-fixed --observation 0.25
//! beam_cli envelope --load train --axle 145@0 --axle 145@4.3 --steps 100
//! beam_cli sweep --frames 20 --cancel-at 0.3
//! beam_cli run bridge.json --output bridge.report.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

use beam_core::calculations::{self, SolveOptions, SweepController, SweepState};
use beam_core::file_io::{load_request, save_report};
use beam_core::{
    ApproximationNotice, Axle, BeamConfig, CalcError, CalcResult, LoadCase, ResultSet,
    SupportCondition,
};

#[derive(Parser)]
#[command(name = "beam_cli")]
#[command(about = "Beam moving-load analysis - moments, shears, deflections, influence lines and envelopes", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one load position
    Solve {
        #[command(flatten)]
        beam: BeamArgs,
        #[command(flatten)]
        load: LoadArgs,
        /// Number of intervals along the beam
        #[arg(long, default_value_t = 100)]
        divisions: usize,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Moment influence line at an observation point
    Influence {
        #[command(flatten)]
        beam: BeamArgs,
        /// Normalized observation point in [0, 1]
        #[arg(long, default_value_t = 0.5)]
        observation: f64,
        /// Number of intervals along the beam
        #[arg(long, default_value_t = 100)]
        divisions: usize,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Moving-load envelope of maximum |M| and |V|
    Envelope {
        #[command(flatten)]
        beam: BeamArgs,
        #[command(flatten)]
        load: LoadArgs,
        /// Sweep increments (positions solved = steps + 1)
        #[arg(long, default_value_t = 50)]
        steps: usize,
        /// Number of intervals along the beam
        #[arg(long, default_value_t = 100)]
        divisions: usize,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Step the load across the beam frame by frame
    Sweep {
        #[command(flatten)]
        beam: BeamArgs,
        #[command(flatten)]
        load: LoadArgs,
        /// Number of fixed steps
        #[arg(long, default_value_t = 10)]
        frames: usize,
        /// Cancel once progress reaches this fraction
        #[arg(long)]
        cancel_at: Option<f64>,
        /// Print every frame as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Run an analysis request file
    Run {
        /// Path to the request JSON file
        request_path: PathBuf,
        /// Write the report here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SupportArg {
    SimplySupported,
    Cantilever,
    FixedFixed,
    FixedPinned,
    MultiSpan,
}

#[derive(Args)]
struct BeamArgs {
    /// Beam length (m)
    #[arg(long, default_value_t = 10.0)]
    length: f64,
    /// Support condition
    #[arg(long, value_enum, default_value_t = SupportArg::SimplySupported)]
    support: SupportArg,
    /// Number of equal spans for a multi-span beam
    #[arg(long, default_value_t = 2)]
    segments: u32,
    /// Modulus of elasticity (GPa)
    #[arg(long, default_value_t = 200.0)]
    e_gpa: f64,
    /// Moment of inertia (cm⁴)
    #[arg(long, default_value_t = 100_000.0)]
    i_cm4: f64,
}

impl BeamArgs {
    fn to_config(&self) -> BeamConfig {
        let support = match self.support {
            SupportArg::SimplySupported => SupportCondition::SimplySupported,
            SupportArg::Cantilever => SupportCondition::Cantilever,
            SupportArg::FixedFixed => SupportCondition::FixedFixed,
            SupportArg::FixedPinned => SupportCondition::FixedPinned,
            SupportArg::MultiSpan => SupportCondition::MultiSpan {
                segments: self.segments,
            },
        };
        BeamConfig::new(self.length, support, self.e_gpa, self.i_cm4)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LoadKind {
    Point,
    Distributed,
    Train,
}

#[derive(Args)]
struct LoadArgs {
    /// Load type
    #[arg(long = "load", value_enum, default_value_t = LoadKind::Point)]
    kind: LoadKind,
    /// Point load (kN) or distributed intensity (kN/m)
    #[arg(long, default_value_t = 100.0)]
    magnitude: f64,
    /// Distributed load width (m)
    #[arg(long, default_value_t = 1.0)]
    width: f64,
    /// Normalized position in [0, 1] (centroid, or lead axle for trains)
    #[arg(long, default_value_t = 0.5)]
    position: f64,
    /// Train axle as MAGNITUDE_KN@OFFSET_M, repeatable
    #[arg(long = "axle", value_parser = parse_axle)]
    axles: Vec<Axle>,
}

impl LoadArgs {
    fn to_load_case(&self) -> LoadCase {
        match self.kind {
            LoadKind::Point => LoadCase::point(self.magnitude, self.position),
            LoadKind::Distributed => LoadCase::distributed(self.magnitude, self.width, self.position),
            LoadKind::Train => LoadCase::train(self.axles.clone(), self.position),
        }
    }
}

fn parse_axle(s: &str) -> Result<Axle, String> {
    let (magnitude, offset) = s
        .split_once('@')
        .ok_or_else(|| format!("expected MAGNITUDE_KN@OFFSET_M, got '{s}'"))?;
    let magnitude: f64 = magnitude
        .trim()
        .parse()
        .map_err(|e| format!("bad axle magnitude '{magnitude}': {e}"))?;
    let offset: f64 = offset
        .trim()
        .parse()
        .map_err(|e| format!("bad axle offset '{offset}': {e}"))?;
    Ok(Axle::new(magnitude, offset))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Solve {
            beam,
            load,
            divisions,
            json,
        } => cmd_solve(&beam.to_config(), &load.to_load_case(), divisions, json),
        Commands::Influence {
            beam,
            observation,
            divisions,
            json,
        } => cmd_influence(&beam.to_config(), observation, divisions, json),
        Commands::Envelope {
            beam,
            load,
            steps,
            divisions,
            json,
        } => cmd_envelope(&beam.to_config(), &load.to_load_case(), steps, divisions, json),
        Commands::Sweep {
            beam,
            load,
            frames,
            cancel_at,
            json,
        } => cmd_sweep(&beam.to_config(), load.to_load_case(), frames, cancel_at, json),
        Commands::Run {
            request_path,
            output,
        } => cmd_run(&request_path, output.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            if e.is_input_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_solve(beam: &BeamConfig, load: &LoadCase, divisions: usize, json: bool) -> CalcResult<()> {
    let result = calculations::solve_with(beam, load, &SolveOptions { divisions })?;

    print_banner("BEAM ANALYSIS RESULTS");
    print_input(beam, load);
    print_response(&result);
    print_footer();

    if json {
        print_json(&result)?;
    }
    Ok(())
}

fn cmd_influence(beam: &BeamConfig, observation: f64, divisions: usize, json: bool) -> CalcResult<()> {
    let line = calculations::influence_line_with(beam, observation, &SolveOptions { divisions })?;

    print_banner("MOMENT INFLUENCE LINE");
    println!("Beam:");
    println!("  {}  L = {:.3} m", beam.support, beam.length_m);
    println!("  Observation point: x = {:.3} m", line.observation_m);
    println!();
    let (x, peak) = line.peak();
    println!("Peak ordinate: {:.4} kN·m/kN with unit load at x = {:.3} m", peak, x);
    print_notices(line.notice.as_slice());
    print_footer();

    if json {
        print_json(&line)?;
    }
    Ok(())
}

fn cmd_envelope(
    beam: &BeamConfig,
    load: &LoadCase,
    steps: usize,
    divisions: usize,
    json: bool,
) -> CalcResult<()> {
    let envelope = calculations::envelope_with(beam, load, steps, &SolveOptions { divisions })?;

    print_banner("MOVING LOAD ENVELOPE");
    print_input(beam, load);
    println!("Sweep: {} steps ({} positions)", envelope.steps, envelope.steps + 1);
    println!();
    let (xm, m) = envelope.peak_moment();
    let (xv, v) = envelope.peak_shear();
    println!("Envelope:");
    println!("  max |M| = {:.2} kN·m at x = {:.3} m", m, xm);
    println!("  max |V| = {:.2} kN   at x = {:.3} m", v, xv);
    print_notices(&envelope.notices);
    print_footer();

    if json {
        print_json(&envelope)?;
    }
    Ok(())
}

fn cmd_sweep(
    beam: &BeamConfig,
    load: LoadCase,
    frames: usize,
    cancel_at: Option<f64>,
    json: bool,
) -> CalcResult<()> {
    let mut sweep = SweepController::new(beam, load, std::time::Duration::from_secs(1))?;
    let handle = sweep.cancel_handle();
    let mut write_error = None;

    if !json {
        println!("{:>8}  {:>8}  {:>12}  {:>12}", "progress", "x (m)", "max|M| kN·m", "max|δ| mm");
    }

    let state = sweep.run_stepped(frames, |frame| {
        if json {
            match serde_json::to_string(frame) {
                Ok(line) => println!("{}", line),
                Err(e) => write_error = Some(CalcError::from(e)),
            }
        } else {
            let (_, m) = frame.result.max_abs_moment();
            let (_, d) = frame.result.max_abs_deflection();
            println!(
                "{:>8.3}  {:>8.3}  {:>12.2}  {:>12.3}",
                frame.progress,
                frame.position * beam.length_m,
                m,
                d
            );
        }
        if cancel_at.is_some_and(|limit| frame.progress >= limit) {
            debug!(progress = frame.progress, "cancel threshold reached");
            handle.cancel();
        }
    })?;

    if let Some(e) = write_error {
        return Err(e);
    }

    if !json {
        println!();
        match state {
            SweepState::Finished => println!("Sweep finished"),
            SweepState::Cancelled => println!(
                "Sweep cancelled at progress {:.3}",
                sweep.last_frame().map_or(0.0, |f| f.progress)
            ),
            SweepState::Running => println!("Sweep stopped"),
        }
    }
    Ok(())
}

fn cmd_run(request_path: &Path, output: Option<&Path>) -> CalcResult<()> {
    let request = load_request(request_path)?;
    let report = request.run()?;

    match output {
        Some(path) => {
            save_report(&report, path)?;
            info!(path = %path.display(), "report written");
            print_banner("BEAM ANALYSIS RESULTS");
            print_input(&request.beam, &request.load);
            print_response(&report.results);
            print_footer();
            println!("Report written to {}", path.display());
        }
        None => print_json(&report)?,
    }
    Ok(())
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
    println!();
}

fn print_footer() {
    println!("═══════════════════════════════════════");
}

fn print_input(beam: &BeamConfig, load: &LoadCase) {
    println!("Input:");
    println!("  Support:  {}", beam.support);
    println!("  Span:     {:.3} m", beam.length_m);
    println!(
        "  Section:  E = {:.1} GPa, I = {:.0} cm⁴ (EI = {:.4e} N·m²)",
        beam.elastic_modulus_gpa,
        beam.moment_of_inertia_cm4,
        beam.flexural_rigidity().0
    );
    match load {
        LoadCase::Point(p) => println!(
            "  Load:     point {:.2} kN at x = {:.3} m",
            p.magnitude_kn,
            p.position_m(beam.length_m)
        ),
        LoadCase::Distributed(d) => {
            let (a, b) = d.extent_m(beam.length_m);
            println!(
                "  Load:     {:.2} kN/m from {:.3} m to {:.3} m",
                d.magnitude_kn_per_m, a, b
            );
        }
        LoadCase::Train(t) => println!(
            "  Load:     train of {} axles ({:.1} kN gross), lead axle at {:.3} m",
            t.axles.len(),
            t.gross_load_kn(),
            t.position * beam.length_m
        ),
    }
    println!();
}

fn print_response(result: &ResultSet) {
    println!("Reactions:");
    for r in &result.reactions {
        if r.moment_knm == 0.0 {
            println!("  x = {:>7.3} m   R = {:>10.2} kN", r.position_m, r.force_kn);
        } else {
            println!(
                "  x = {:>7.3} m   R = {:>10.2} kN   M = {:>10.2} kN·m",
                r.position_m, r.force_kn, r.moment_knm
            );
        }
    }
    println!();

    let (xm, m) = result.max_abs_moment();
    let (xv, v) = result.max_abs_shear();
    let (xd, d) = result.max_abs_deflection();
    println!("Demand:");
    println!("  M_max = {:>10.2} kN·m at x = {:.3} m", m, xm);
    println!("  V_max = {:>10.2} kN   at x = {:.3} m", v, xv);
    println!("  δ_max = {:>10.3} mm   at x = {:.3} m", d, xd);

    if let Some(envelope) = &result.envelope {
        let (x, peak) = envelope.peak_moment();
        println!("  Envelope max |M| = {:.2} kN·m at x = {:.3} m", peak, x);
    }
    print_notices(&result.notices);
}

fn print_notices(notices: &[ApproximationNotice]) {
    if notices.is_empty() {
        return;
    }
    println!();
    println!("Approximations:");
    for notice in notices {
        println!("  [APPROX] {}", notice);
    }
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!();
    println!("{}", json);
    Ok(())
}
