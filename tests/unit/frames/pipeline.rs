use std::path::PathBuf;

use super::*;
use crate::corpus::model::{Ride, Track};
use crate::corpus::store::MemoryCorpus;
use crate::foundation::core::{Coordinate, FrameIndex};

fn ride(id: u64, start: &str) -> Ride {
    Ride {
        id,
        name: format!("ride {id}"),
        start_time: start.to_string(),
        distance_m: 0.0,
        elevation_gain_m: 0.0,
        elapsed_time_s: 0.0,
        moving_time_s: 0.0,
    }
}

fn corpus() -> MemoryCorpus {
    let latlng = (0..5)
        .map(|i| Coordinate::new(51.5, -0.1 + f64::from(i) * 0.00004))
        .collect();
    MemoryCorpus::new().with_ride(
        ride(1, "2022-06-01T06:00:00+0000"),
        Some(Track::new(latlng)),
    )
}

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_pipeline").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn small_config() -> RenderConfig {
    RenderConfig {
        frames: 3,
        workers: 2,
        margin: 4,
        ..RenderConfig::default()
    }
}

#[test]
fn renders_onto_blank_canvas_and_creates_out_dir() {
    let dir = out_dir("blank");
    let report = render_frames(&corpus(), &RenderAssets::default(), &dir, &small_config()).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.frames.len(), 3);
    let img = image::open(dir.join(FrameIndex(2).file_name()))
        .unwrap()
        .to_rgba8();
    assert_eq!(img.width() % 2, 1);
    assert_eq!(img.height() % 2, 1);
}

#[test]
fn small_background_is_used_as_is() {
    let dir = out_dir("small_background");
    let assets = RenderAssets {
        background: Some(RgbaImage::from_pixel(6, 4, image::Rgba([10, 20, 30, 255]))),
        stamper: None,
    };
    let report = render_frames(&corpus(), &assets, &dir, &small_config()).unwrap();
    assert_eq!(report.frames.len(), 3);

    let img = image::open(dir.join(FrameIndex(0).file_name()))
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (7, 5));
    assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
}

#[test]
fn empty_corpus_fails_before_rendering() {
    let dir = out_dir("empty");
    let corpus = MemoryCorpus::new().with_ride(ride(1, "2022-06-01T06:00:00+0000"), None);
    let err = render_frames(&corpus, &RenderAssets::default(), &dir, &small_config()).unwrap_err();
    assert!(matches!(err, RideError::Corpus(_)));
    assert!(!dir.exists());
}

#[test]
fn invalid_config_fails_before_rendering() {
    let dir = out_dir("invalid");
    let config = RenderConfig {
        workers: 0,
        ..small_config()
    };
    let err = render_frames(&corpus(), &RenderAssets::default(), &dir, &config).unwrap_err();
    assert!(matches!(err, RideError::Validation(_)));
    assert!(!dir.exists());
}

#[test]
fn polar_track_without_background_is_rejected() {
    let dir = out_dir("polar");
    let corpus = MemoryCorpus::new().with_ride(
        ride(1, "2022-06-01T06:00:00+0000"),
        Some(Track::new(vec![
            Coordinate::new(89.999, 0.0),
            Coordinate::new(90.0, 0.0001),
        ])),
    );
    let err = render_frames(&corpus, &RenderAssets::default(), &dir, &small_config()).unwrap_err();
    assert!(matches!(err, RideError::Validation(_)));
    assert!(!dir.exists());
}
