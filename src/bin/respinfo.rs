// Print a summary of a stored field-response file.

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fieldresp::persist;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a field-response JSON file
    #[arg(value_name = "RESPONSE_FILE")]
    file: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let fr = persist::load(&args.file)?;

    println!(
        "origin {:.1} mm, tstart {:.2} us, period {:.3} us, axis [{:.2} {:.2} {:.2}]",
        fr.origin, fr.tstart, fr.period, fr.axis[0], fr.axis[1], fr.axis[2]
    );

    for plane in &fr.planes {
        let nticks = plane.paths.iter().map(|p| p.current.len()).max().unwrap_or(0);
        let regions: Vec<i64> = plane.paths.iter().map(|p| p.region(plane.pitch)).collect();
        let span = match (regions.iter().min(), regions.iter().max()) {
            (Some(lo), Some(hi)) => format!("regions {lo}..={hi}"),
            _ => "no paths".to_string(),
        };
        println!(
            "plane {}: location {:.1} mm, pitch {:.2} mm, {} paths, {} ticks, {}",
            plane.planeid,
            plane.location,
            plane.pitch,
            plane.paths.len(),
            nticks,
            span
        );
    }

    Ok(())
}
