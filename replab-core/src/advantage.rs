//! Generalized advantage estimation.

/// Computes advantages from temporal-difference errors of one episode.
///
/// The sequence is scanned from the last step backwards:
/// `A_t = delta_t + gamma * lambda * A_{t+1}` with `A_T = 0`.
///
/// ```rust
/// use replab_core::compute_advantage;
///
/// let adv = compute_advantage(0.5, 1.0, &[1.0, 1.0]);
/// assert_eq!(adv, vec![1.5, 1.0]);
/// ```
pub fn compute_advantage(gamma: f32, lambda: f32, td_delta: &[f32]) -> Vec<f32> {
    let mut advantage = 0f32;
    let mut advantages = td_delta
        .iter()
        .rev()
        .map(|delta| {
            advantage = gamma * lambda * advantage + delta;
            advantage
        })
        .collect::<Vec<_>>();
    advantages.reverse();
    advantages
}
