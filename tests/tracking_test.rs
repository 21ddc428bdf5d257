use huetrack_rs::{Detection, MatchingPolicy, MultiBallTracker, TrackerConfig};
use imageproc::point::Point;
use nalgebra::Point2;

/// Detection with a square source contour of the given side length centered
/// on the position, so contour area is side^2.
fn det_with(x: f32, y: f32, radius: f32, side: i32) -> Detection {
    let (cx, cy) = (x.round() as i32, y.round() as i32);
    let half = side / 2;
    Detection {
        position: Point2::new(x, y),
        radius,
        label: "red".to_string(),
        contour: vec![
            Point::new(cx - half, cy - half),
            Point::new(cx + half, cy - half),
            Point::new(cx + half, cy + half),
            Point::new(cx - half, cy + half),
        ],
    }
}

/// Detection whose contour area (2500) clears the default min_area of 1000.
fn det(x: f32, y: f32) -> Detection {
    det_with(x, y, 20.0, 50)
}

/// Detection whose contour area (100) falls under the default min_area.
fn small_det(x: f32, y: f32) -> Detection {
    det_with(x, y, 20.0, 10)
}

#[test]
fn creates_tracks_and_keeps_identity_under_motion() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());

    let tracks = tracker.update(&[det(100.0, 100.0)]);
    assert_eq!(tracks.len(), 1);
    let track = tracks.get(0).expect("first track gets id 0");
    assert_eq!(track.history_len(), 1);
    assert_eq!(track.label(), "red");

    // Moved a little: still within max_distance of the prediction.
    let tracks = tracker.update(&[det(105.0, 100.0)]);
    assert_eq!(tracks.len(), 1);
    let track = tracks.get(0).expect("id persists");
    assert_eq!(track.history_len(), 2);
    assert_eq!(track.last_position(), Point2::new(105.0, 100.0));
}

#[test]
fn unmatched_tracks_are_removed_the_same_frame() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(100.0, 100.0)]);
    assert_eq!(tracker.tracks().len(), 1);

    // No detections: no grace period, the store empties immediately.
    let tracks = tracker.update(&[]);
    assert!(tracks.is_empty());
}

#[test]
fn ids_increase_and_are_never_reused() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(100.0, 100.0)]);
    tracker.update(&[]);

    // The original track is gone; a new one never takes its id.
    let tracks = tracker.update(&[det(100.0, 100.0)]);
    assert!(tracks.get(0).is_none());
    assert!(tracks.get(1).is_some());
}

#[test]
fn constant_velocity_prediction_drives_matching() {
    // History [(0,0), (10,0)] predicts (20,0).
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(0.0, 0.0)]);
    tracker.update(&[det(10.0, 0.0)]);

    // (19,1) is ~1.4px from the prediction: matched.
    let tracks = tracker.update(&[det(19.0, 1.0)]);
    let track = tracks.get(0).expect("still track 0");
    assert_eq!(track.history_len(), 3);

    // Same setup, but the detection lands nowhere near the prediction.
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(0.0, 0.0)]);
    tracker.update(&[det(10.0, 0.0)]);
    let tracks = tracker.update(&[det(1000.0, 1000.0)]);
    assert_eq!(tracks.len(), 1);
    assert!(tracks.get(0).is_none(), "old track aged out");
    assert!(tracks.get(1).is_some(), "far detection became a new track");
}

#[test]
fn history_is_capped_at_buffer_size() {
    let config = TrackerConfig {
        buffer_size: 3,
        ..TrackerConfig::default()
    };
    let mut tracker = MultiBallTracker::new(config);
    for x in [0.0, 10.0, 20.0, 30.0] {
        tracker.update(&[det(x, 0.0)]);
    }

    let track = tracker.tracks().get(0).expect("one track throughout");
    assert_eq!(track.history_len(), 3);
    let xs: Vec<f32> = track.positions().map(|p| p.x).collect();
    assert_eq!(xs, vec![10.0, 20.0, 30.0], "oldest position evicted first");
}

#[test]
fn under_area_detections_never_touch_tracks() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());

    // Too small to create a track...
    tracker.update(&[small_det(100.0, 100.0)]);
    assert!(tracker.tracks().is_empty());

    // ...and too small to keep one alive, regardless of proximity.
    tracker.update(&[det(100.0, 100.0)]);
    let tracks = tracker.update(&[small_det(101.0, 100.0)]);
    assert!(tracks.is_empty());
}

#[test]
fn matched_radius_replaces_the_stored_one() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det_with(100.0, 100.0, 20.0, 50)]);
    let tracks = tracker.update(&[det_with(102.0, 100.0, 26.0, 50)]);
    assert_eq!(tracks.get(0).unwrap().radius(), 26.0);
}

#[test]
fn greedy_matching_takes_the_first_detection_in_order() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(0.0, 0.0)]);

    // Both detections start within max_distance of the track. The first one
    // in list order wins; after it is applied the track predicts (20,0), which
    // pushes the second detection out of range.
    let tracks = tracker.update(&[det(10.0, 0.0), det(-40.0, 0.0)]);
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks.get(0).unwrap().last_position(), Point2::new(10.0, 0.0));
    assert_eq!(tracks.get(1).unwrap().last_position(), Point2::new(-40.0, 0.0));
}

#[test]
fn greedy_matching_can_feed_one_track_twice() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(0.0, 0.0)]);

    // The second detection still falls within range of the track's refreshed
    // prediction, so it appends to the same track instead of starting a new
    // one. Order-dependent by design.
    let tracks = tracker.update(&[det(5.0, 0.0), det(3.0, 0.0)]);
    assert_eq!(tracks.len(), 1);
    let track = tracks.get(0).unwrap();
    assert_eq!(track.history_len(), 3);
    assert_eq!(track.last_position(), Point2::new(3.0, 0.0));
}

#[test]
fn min_cost_policy_minimizes_total_distance() {
    let greedy_config = TrackerConfig::default();
    let min_cost_config = TrackerConfig {
        policy: MatchingPolicy::MinCost,
        ..TrackerConfig::default()
    };

    // Two tracks at x=0 and x=100, then detections at x=45 and x=5.
    let frame1 = [det(0.0, 0.0), det(100.0, 0.0)];
    let frame2 = [det(45.0, 0.0), det(5.0, 0.0)];

    // Greedy: the x=45 detection grabs track 0 first.
    let mut tracker = MultiBallTracker::new(greedy_config);
    tracker.update(&frame1);
    let tracks = tracker.update(&frame2);
    assert_eq!(tracks.get(0).unwrap().last_position(), Point2::new(45.0, 0.0));

    // Min-cost: track 0 takes the x=5 detection (5 + 55 beats 45 + 95), and
    // the 55px pairing for track 1 is over threshold, so x=45 starts fresh.
    let mut tracker = MultiBallTracker::new(min_cost_config);
    tracker.update(&frame1);
    let tracks = tracker.update(&frame2);
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks.get(0).unwrap().last_position(), Point2::new(5.0, 0.0));
    assert!(tracks.get(1).is_none(), "track 1 found no pairing under threshold");
    assert_eq!(tracks.get(2).unwrap().last_position(), Point2::new(45.0, 0.0));
}

#[test]
fn cross_color_matches_keep_the_original_label() {
    let mut tracker = MultiBallTracker::new(TrackerConfig::default());
    tracker.update(&[det(100.0, 100.0)]);

    let mut green = det(102.0, 100.0);
    green.label = "green".to_string();
    let tracks = tracker.update(&[green]);

    // Association is color-agnostic; the label is sticky from creation.
    let track = tracks.get(0).expect("matched despite the label change");
    assert_eq!(track.label(), "red");
}
