use std::cmp::Ordering;

use crate::models::{Quote, Ranking};

pub const DEFAULT_TOP_N: usize = 3;

/// Top `top_n` gainers (descending) and losers (ascending) by percent change.
///
/// Sorting is stable, so tied quotes keep their batch order. When the batch
/// holds fewer than `2 * top_n` quotes the same quote may appear in both lists.
pub fn rank(quotes: &[Quote], top_n: usize) -> Ranking {
    let ranked: Vec<&Quote> = quotes
        .iter()
        .filter(|quote| quote.percent_change().is_some())
        .collect();

    let gainers = top_by(&ranked, top_n, |a, b| {
        b.percent_change().cmp(a.percent_change())
    });
    let losers = top_by(&ranked, top_n, |a, b| {
        a.percent_change().cmp(b.percent_change())
    });

    Ranking::new(gainers, losers)
}

fn top_by<F>(quotes: &[&Quote], top_n: usize, compare: F) -> Vec<Quote>
where
    F: FnMut(&&Quote, &&Quote) -> Ordering,
{
    let mut sorted = quotes.to_vec();
    sorted.sort_by(compare);
    sorted.into_iter().take(top_n).cloned().collect()
}
