use std::path::PathBuf;
use std::process::ExitCode;

use env_logger::Env;
use log::{error, info};

use trip_planner::services::geocoding_service::Geocoder;
use trip_planner::services::hotel_file_service::{geocode_hotel_file, write_geocoded_records};

const DEFAULT_INPUT: &str = "data/cleaned_ihg_hotels_with_images.csv";
const DEFAULT_OUTPUT: &str = "data/hotels_with_coordinates.csv";

struct Args {
    input: PathBuf,
    output: PathBuf,
    clean: bool,
}

// geocode-hotels [--clean] [INPUT] [OUTPUT]
fn parse_args() -> Args {
    let mut clean = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--clean" {
            clean = true;
        } else {
            positional.push(arg);
        }
    }
    let mut positional = positional.into_iter();

    let input = positional
        .next()
        .or_else(|| std::env::var("HOTELS_INPUT_PATH").ok())
        .unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output = positional
        .next()
        .or_else(|| std::env::var("HOTELS_OUTPUT_PATH").ok())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    Args {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        clean,
    }
}

fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = parse_args();
    let geocoder = Geocoder::default();

    match geocode_hotel_file(&geocoder, &args.input, &args.output, args.clean) {
        Ok(count) => {
            info!("Geocoded data saved to {} ({} records)", args.output.display(), count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error processing {}: {}", args.input.display(), e);
            // Downstream loaders expect the file to exist even when the batch fails.
            if let Err(e) = write_geocoded_records(&args.output, &[]) {
                error!("Could not write empty output {}: {}", args.output.display(), e);
            }
            ExitCode::FAILURE
        }
    }
}
