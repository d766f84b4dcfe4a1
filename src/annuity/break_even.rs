//! Break-even search between two value curves

/// First age in `start..=end` at which `candidate` catches up with `baseline`
///
/// Scans linearly. If the candidate never catches up the search saturates and
/// returns `end` rather than failing.
pub fn break_even_age<B, C>(start: u32, end: u32, baseline: B, candidate: C) -> u32
where
    B: Fn(u32) -> f64,
    C: Fn(u32) -> f64,
{
    (start..=end)
        .find(|&age| candidate(age) >= baseline(age))
        .unwrap_or(end)
}
