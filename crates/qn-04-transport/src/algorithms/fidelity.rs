//! # Fidelity Model
//!
//! Route fidelity aggregation and the teleportation success probability.

use shared_types::Fidelity;

/// Arithmetic mean of every EPR fidelity found along a route.
///
/// The input is one flat list across all hops, so hops holding more pairs
/// weigh more. Returns `None` for an empty list.
pub fn aggregate_route_fidelity(fidelities: &[Fidelity]) -> Option<f64> {
    if fidelities.is_empty() {
        return None;
    }

    let sum: f64 = fidelities.iter().map(|f| f.value()).sum();
    Some(sum / fidelities.len() as f64)
}

/// Probability that a teleportation succeeds.
///
/// `P = f_s·f_d·f_r + (1−f_s)·(1−f_d)·(1−f_r)`: success when all three
/// agree high or all three agree low.
pub fn success_probability(f_source: f64, f_destination: f64, f_route: f64) -> f64 {
    f_source * f_destination * f_route
        + ((1.0 - f_source) * (1.0 - f_destination) * (1.0 - f_route))
}

/// Success iff the uniform draw does not exceed the probability (inclusive).
pub fn draw_succeeds(draw: f64, probability: f64) -> bool {
    draw <= probability
}
