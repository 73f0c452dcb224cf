//! Forward-only progression through the route's waypoints.
use crate::state::{JourneyState, Landmark};

/// Check whether today's travel reached the landmark at the cursor.
///
/// Only the nearest unreached landmark is compared, so the cursor advances at
/// most one step per call even when a single day passes several markers.
pub fn reach_next_landmark(state: &mut JourneyState) -> Option<Landmark> {
    let landmark = state.next_landmark()?.clone();
    if state.miles_traveled() < landmark.mile {
        return None;
    }
    state.advance_landmark_cursor();
    log::info!("reached {} at mile {}", landmark.name, landmark.mile);
    Some(landmark)
}
