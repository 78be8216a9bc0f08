use std::time::Duration;

use derive_getters::Getters;
use derive_new::new;

use super::Ranking;

/// Outcome of one top-movers scan over a universe.
#[derive(Clone, Debug, Getters, new)]
pub struct MoversReport {
    universe: String,
    requested: usize,
    fetched: usize,
    ranking: Ranking,
    elapsed: Duration,
}
