use super::*;
use crate::foundation::core::Coordinate;

fn ride(id: u64, start: &str) -> Ride {
    Ride {
        id,
        name: format!("ride {id}"),
        start_time: start.to_string(),
        distance_m: 1000.0,
        elevation_gain_m: 0.0,
        elapsed_time_s: 600.0,
        moving_time_s: 500.0,
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_corpus_store").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn json_corpus_sorts_rides_and_skips_missing_tracks() {
    let dir = scratch_dir("json_corpus");
    let maps = dir.join("maps");
    let index = RideIndex {
        rides: vec![
            ride(7, "2022-01-02T10:00:00+0000"),
            ride(3, "2022-01-01T10:00:00+0000"),
        ],
    };
    write_json(&dir.join("result.json"), &index).unwrap();
    write_json(
        &maps.join("3.json"),
        &Track::new(vec![Coordinate::new(1.0, 2.0)]),
    )
    .unwrap();
    std::fs::write(maps.join("7.json"), b"{ not json").unwrap();

    let corpus = JsonCorpus::new(dir.join("result.json"), &maps);
    let rides = corpus.rides().unwrap();
    assert_eq!(rides.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 7]);

    let t3 = corpus.track(&rides[0]).unwrap().unwrap();
    assert_eq!(t3.latlng, vec![Coordinate::new(1.0, 2.0)]);
    assert!(corpus.track(&rides[1]).unwrap().is_none());
    assert!(corpus.track(&ride(99, "2022-01-03T10:00:00+0000")).unwrap().is_none());
}

#[test]
fn missing_index_is_an_io_error() {
    let dir = scratch_dir("missing_index");
    let corpus = JsonCorpus::new(dir.join("nope.json"), dir.join("maps"));
    assert!(matches!(corpus.rides(), Err(RideError::Io { .. })));
}

#[test]
fn memory_corpus_orders_by_start_time() {
    let corpus = MemoryCorpus::new()
        .with_ride(ride(2, "2020-06-02T00:00:00+0000"), Some(Track::default()))
        .with_ride(ride(1, "2020-06-01T00:00:00+0000"), None);
    let rides = corpus.rides().unwrap();
    assert_eq!(rides[0].id, 1);
    assert!(corpus.track(&rides[0]).unwrap().is_none());
    assert!(corpus.track(&rides[1]).unwrap().is_some());
}
