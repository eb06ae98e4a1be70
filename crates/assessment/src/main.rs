//! crash-assess - run the accident engine over a JSON detection dump
//!
//! Reads a JSON array of detections (as produced at the detector boundary,
//! with regions assigned), estimates the accident, and prints the verdict
//! plus the primary damage as JSON.
//!
//! Usage: crash-assess <detections.json> [--car-count N] [--multi]

use std::fs;
use std::process::ExitCode;

use serde::Serialize;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use accident_engine::{AccidentAssessment, AccidentEngine, AssessmentMode};
use damage_core::Detection;

#[derive(Serialize)]
struct EngineOutput {
    assessment: AccidentAssessment,
    primary_damage: Option<Detection>,
}

struct Args {
    input: String,
    car_count: usize,
    mode: AssessmentMode,
}

fn parse_args() -> Result<Args, String> {
    let mut input = None;
    let mut car_count = 1;
    let mut mode = AssessmentMode::Single;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--car-count" => {
                let value = args.next().ok_or("--car-count needs a value")?;
                car_count = value
                    .parse()
                    .map_err(|_| format!("invalid car count: {value}"))?;
            }
            "--multi" => mode = AssessmentMode::Multi,
            other if input.is_none() => input = Some(other.to_owned()),
            other => return Err(format!("unexpected argument: {other}")),
        }
    }

    let input = input.ok_or("usage: crash-assess <detections.json> [--car-count N] [--multi]")?;
    Ok(Args {
        input,
        car_count,
        mode,
    })
}

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    // Ignore the error if a test harness already installed a subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(&args.input)?;
    let detections: Vec<Detection> = serde_json::from_str(&raw)?;
    info!(
        detections = detections.len(),
        car_count = args.car_count,
        "estimating accident"
    );

    let engine = AccidentEngine::default();
    let assessment = engine.estimate_accident(&detections, args.car_count, args.mode);
    let primary_damage = engine.select_primary_damage(&detections).cloned();

    let output = EngineOutput {
        assessment,
        primary_damage,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("assessment failed: {err}");
            ExitCode::FAILURE
        }
    }
}
