use hog_descriptor::config::{load_config, HogToolConfig};
use hog_descriptor::image::io::{load_grayscale_image, save_grayscale_u8, write_json_file};
use hog_descriptor::intensity::{grid_to_gray, ORIENTATION_IMAGE_SCALE};
use hog_descriptor::{HogDescriptor, HogReport};
use log::{info, warn};
use serde::Serialize;
use std::env;
use std::error::Error;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let (width, height) = (config.window.width, config.window.height);
    if gray.width() != width || gray.height() != height {
        warn!(
            "resizing {} from {}x{} to {}x{}",
            config.input.display(),
            gray.width(),
            gray.height(),
            width,
            height
        );
    }
    let window = gray.resized(width, height)?;

    let hog = HogDescriptor::new(config.hog.clone())?;
    let report = hog.compute_with_diagnostics(&window.as_view())?;

    let summary = FeatureSummary {
        width,
        height,
        descriptor_len: report.descriptor.len(),
        features: report.descriptor.as_slice(),
    };
    write_json_file(&config.output.features_json, &summary)?;
    println!(
        "Saved {} features to {}",
        summary.descriptor_len,
        config.output.features_json.display()
    );

    save_stage_images(&config, &report)?;

    if let Some(dir) = &config.output.debug_dir {
        save_debug_dumps(dir, &report)?;
        println!("Debug dumps written to {}", dir.display());
    }

    println!("Total time: {:.3} ms", report.trace.timings.total_ms);
    Ok(())
}

fn save_stage_images(config: &HogToolConfig, report: &HogReport) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &config.output.magnitude_image {
        let img = grid_to_gray(&report.gradients.magnitude, None)?;
        save_grayscale_u8(&img, path)?;
        println!("Saved magnitude image to {}", path.display());
    }
    if let Some(path) = &config.output.orientation_image {
        let img = grid_to_gray(&report.gradients.orientation, Some(ORIENTATION_IMAGE_SCALE))?;
        save_grayscale_u8(&img, path)?;
        println!("Saved orientation image to {}", path.display());
    }
    Ok(())
}

fn save_debug_dumps(dir: &Path, report: &HogReport) -> Result<(), Box<dyn Error>> {
    write_json_file(&dir.join("dump.json"), &report.intensity.to_rows())?;
    write_json_file(
        &dir.join("magnitudes.json"),
        &report.gradients.magnitude.to_rows(),
    )?;
    write_json_file(
        &dir.join("angles.json"),
        &report.gradients.orientation.to_rows(),
    )?;
    write_json_file(&dir.join("hist.json"), &report.cells.to_nested())?;
    write_json_file(&dir.join("features.json"), &report.blocks.to_nested())?;
    write_json_file(&dir.join("trace.json"), &report.trace)?;
    info!("wrote 6 debug dumps to {}", dir.display());
    Ok(())
}

fn usage() -> String {
    "Usage: hog_extract <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureSummary<'a> {
    width: usize,
    height: usize,
    descriptor_len: usize,
    features: &'a [f32],
}
