//! Domain invariants for the Transport Layer

/// INVARIANT-1: Qubit Conservation
///
/// Across one teleportation attempt the two memories together lose exactly
/// one qubit on success (the destination's original is destroyed) and none
/// on failure (both qubits are returned).
pub fn invariant_qubit_conservation(
    total_before: usize,
    total_after: usize,
    success: bool,
) -> bool {
    if success {
        total_before.checked_sub(1) == Some(total_after)
    } else {
        total_before == total_after
    }
}

/// INVARIANT-2: EPR Consumption
///
/// A teleportation over a fully provisioned route of `hops` hops removes
/// exactly `hops` pairs from the network, whatever the outcome.
pub fn invariant_epr_consumption(pairs_before: usize, pairs_after: usize, hops: usize) -> bool {
    pairs_before.checked_sub(hops) == Some(pairs_after)
}

/// INVARIANT-3: Probability Bounds
///
/// The success probability is a probability.
pub fn invariant_probability_bounds(probability: f64) -> bool {
    probability.is_finite() && (0.0..=1.0).contains(&probability)
}
