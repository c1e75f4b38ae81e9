use std::time::Instant;

use canny_edge::{raster_to_luma8, visualize_edges, CannyConfig, Raster, EDGE};
use env_logger::Builder;
use image::{open, GrayImage, Luma};
use log::info;

fn main() {
    Builder::from_default_env().format_timestamp_nanos().init();

    // Input path is optional, a synthetic disc is used otherwise
    let img = match std::env::args().nth(1) {
        Some(path) => open(&path).unwrap().to_luma8(),
        None => GrayImage::from_fn(128, 96, |x, y| {
            let dx = x as i32 - 64;
            let dy = y as i32 - 48;
            if dx * dx + dy * dy < 30 * 30 {
                Luma([210u8])
            } else {
                Luma([35u8])
            }
        }),
    };
    info!("Loaded image: {}x{}", img.width(), img.height());

    let config = CannyConfig::default();
    let raster = Raster::from(&img);

    let instance = Instant::now();
    let stages = config.detect_stages(&raster).unwrap();
    let elapsed = instance.elapsed();
    info!("Detection took: {elapsed:?}");

    let edge_count = stages.edges.count(|v| v == EDGE);
    info!("Found {} edge pixels", edge_count);

    let result = visualize_edges(&img, &stages.edges).unwrap();
    result.save("canny_edges.png").unwrap();
    raster_to_luma8(&stages.blurred)
        .save("canny_blurred.png")
        .unwrap();
}
