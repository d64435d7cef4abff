//! Frame-time telemetry as seen through the public API

use spacesim::config::SimulationConfig;
use spacesim::{RingBuffer, RingBufferError, SimulationController};

#[test]
fn frame_times_keep_the_most_recent_window() {
    let mut config = SimulationConfig::default();
    config.telemetry.capacity = 8;
    let mut controller = SimulationController::from_config(&config).unwrap();

    for frame in 0..20 {
        controller.advance_frame(1.0 / 60.0);
        controller.record_frame_duration(frame as f32);
    }

    let frame_times = controller.frame_times();
    assert_eq!(frame_times.len(), 8);
    let window: Vec<f32> = (0..frame_times.len() as isize)
        .map(|i| *frame_times.get(i).unwrap())
        .collect();
    assert_eq!(window, [12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0]);
    assert_eq!(frame_times.get(-1), Ok(&19.0));
    assert_eq!(frame_times.get(-8), Ok(&12.0));
}

#[test]
fn out_of_range_reads_are_reported() {
    let mut buffer = RingBuffer::new(4).unwrap();
    assert_eq!(
        buffer.get(0),
        Err(RingBufferError::OutOfRange { index: 0, len: 0 })
    );

    buffer.extend([1, 2, 3]);
    assert_eq!(
        buffer.get(3),
        Err(RingBufferError::OutOfRange { index: 3, len: 3 })
    );
    assert_eq!(
        buffer.get(-4),
        Err(RingBufferError::OutOfRange { index: -4, len: 3 })
    );
}

#[test]
fn zero_capacity_is_rejected_everywhere() {
    assert_eq!(
        RingBuffer::<f32>::new(0).err(),
        Some(RingBufferError::InvalidArgument)
    );

    let mut config = SimulationConfig::default();
    config.telemetry.capacity = 0;
    assert!(SimulationController::from_config(&config).is_err());
}
