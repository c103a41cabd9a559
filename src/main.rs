use std::env;
use std::io::{self, Write};

use cannon_sim::core::kinematics::{exit_point, exit_speed, recoil_velocity, time_to_exit};
use cannon_sim::core::params::LaunchParameters;
use cannon_sim::core::state::Landing;
use cannon_sim::core::trajectory::{
    SamplingConfig, Trajectory, TrajectoryOutcome, sample_trajectory,
};
use chrono::Local;
use macroquad::math::vec2;
use plotters::prelude::*;

#[derive(Clone, Copy, Debug)]
struct Inputs {
    angle_deg: f32,
    speed_mps: f32,
    barrel_m: f32,
    height_m: f32,
}

impl Inputs {
    fn launch_parameters(self) -> LaunchParameters {
        LaunchParameters {
            origin: vec2(0.0, self.height_m),
            muzzle_speed_mps: self.speed_mps,
            barrel_length_m: self.barrel_m,
            ..LaunchParameters::default()
        }
        .with_angle_deg(self.angle_deg)
    }
}

struct Options {
    inputs: Inputs,
    plot_path: Option<String>,
}

fn parse_f32(value: &str, label: &str) -> Result<f32, String> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid {label}: '{value}'. Expected a number."))
}

fn read_f32(prompt: &str) -> Result<f32, String> {
    loop {
        print!("{prompt}");
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {e}"))?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .map_err(|e| format!("Could not read input: {e}"))?;

        if bytes == 0 {
            return Err("Input ended unexpectedly (EOF).".to_string());
        }

        match line.trim().parse::<f32>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn get_inputs_from_user() -> Result<Inputs, String> {
    Ok(Inputs {
        angle_deg: read_f32("Angle (degrees): ")?,
        speed_mps: read_f32("Muzzle speed (m/s): ")?,
        barrel_m: read_f32("Barrel length (m): ")?,
        height_m: read_f32("Pivot height (m): ")?,
    })
}

fn get_inputs_from_args(args: &[String]) -> Result<Inputs, String> {
    if args.len() != 3 && args.len() != 4 {
        return Err(
            "Expected 3 or 4 arguments: <angle_deg> <speed_mps> <barrel_m> [height_m]."
                .to_string(),
        );
    }

    Ok(Inputs {
        angle_deg: parse_f32(&args[0], "angle")?,
        speed_mps: parse_f32(&args[1], "muzzle speed")?,
        barrel_m: parse_f32(&args[2], "barrel length")?,
        height_m: match args.get(3) {
            Some(value) => parse_f32(value, "height")?,
            None => 0.0,
        },
    })
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut positional = Vec::new();
    let mut plot_path = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--plot" {
            let path = iter
                .next()
                .ok_or_else(|| "--plot needs an output file, e.g. --plot arc.svg".to_string())?;
            plot_path = Some(path.clone());
        } else {
            positional.push(arg.clone());
        }
    }

    let inputs = if positional.is_empty() {
        get_inputs_from_user()?
    } else {
        get_inputs_from_args(&positional)?
    };

    Ok(Options { inputs, plot_path })
}

fn outcome_text(outcome: TrajectoryOutcome) -> &'static str {
    match outcome {
        TrajectoryOutcome::Landed(Landing::Ground) => "landed",
        TrajectoryOutcome::Landed(Landing::BackSlip) => "stalled and slid back out of the barrel",
        TrajectoryOutcome::Truncated => "still airborne when the sample budget ran out",
        TrajectoryOutcome::NoMotion => "no motion (muzzle speed is zero)",
    }
}

fn print_report(params: &LaunchParameters, trajectory: &Trajectory) {
    println!(
        "\nFlight report ({})",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "Angle: {:.2} deg | Muzzle speed: {:.2} m/s | Barrel: {:.2} m",
        params.angle_deg(),
        params.muzzle_speed_mps,
        params.barrel_length_m
    );

    match time_to_exit(params) {
        Some(t_exit) => {
            let muzzle = exit_point(params);
            println!("Exit speed: {:.4} m/s", exit_speed(params));
            println!("Time in barrel: {:.4} s", t_exit);
            println!("Muzzle point: ({:.4}, {:.4}) m", muzzle.x, muzzle.y);
            println!(
                "Cannon recoil: {:.4} m/s",
                recoil_velocity(params).length()
            );
        }
        None => println!("Exit speed: 0.0000 m/s (shell never reaches the muzzle)"),
    }

    println!("Outcome: {}", outcome_text(trajectory.outcome()));
    println!("Time of flight: {:.4} s", trajectory.flight_time_s());
    println!("Horizontal distance: {:.4} m", trajectory.range_m());
    println!("Apex height: {:.4} m", trajectory.apex_m());
    println!("Samples: {}", trajectory.len());
}

fn plot_trajectory(
    path: &str,
    params: &LaunchParameters,
    trajectory: &Trajectory,
) -> Result<(), Box<dyn std::error::Error>> {
    let points = trajectory.points();
    let min_x = points.iter().fold(params.origin.x, |acc, p| acc.min(p.x));
    let max_x = points.iter().fold(params.origin.x, |acc, p| acc.max(p.x));
    let span_x = (max_x - min_x).max(1.0) * 1.1;
    let min_y = params.ground_level_m.min(0.0);
    let top_y = trajectory.apex_m().max(min_y + 1.0);
    let max_y = top_y + (top_y - min_y) * 0.1;

    let root = SVGBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(
            (min_x - span_x * 0.05) as f64..(min_x + span_x) as f64,
            min_y as f64..max_y as f64,
        )?;

    chart.draw_series(LineSeries::new(
        [
            ((min_x - span_x) as f64, params.ground_level_m as f64),
            ((max_x + span_x) as f64, params.ground_level_m as f64),
        ],
        &BLACK,
    ))?;

    let muzzle = exit_point(params);
    chart.draw_series(LineSeries::new(
        [
            (params.origin.x as f64, params.origin.y as f64),
            (muzzle.x as f64, muzzle.y as f64),
        ],
        RED.stroke_width(4),
    ))?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|p| (p.x as f64, p.y as f64)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program}");
    println!("  {program} <angle_deg> <speed_mps> <barrel_m> [height_m] [--plot <file.svg>]");
    println!();
    println!("Examples:");
    println!("  {program}");
    println!("  {program} 45 30 5");
    println!("  {program} 30 40 3 2 --plot arc.svg");
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[1..])?;
    let params = options.inputs.launch_parameters().clamped();
    let trajectory = sample_trajectory(&params, &SamplingConfig::default());

    print_report(&params, &trajectory);

    if let Some(path) = options.plot_path {
        plot_trajectory(&path, &params, &trajectory)
            .map_err(|e| format!("Could not write plot '{path}': {e}"))?;
        println!("Plot written to {path}");
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("cargo run --");
        std::process::exit(1);
    }
}
