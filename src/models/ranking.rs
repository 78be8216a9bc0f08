use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;

use super::Quote;

#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, Serialize, new)]
pub struct Ranking {
    gainers: Vec<Quote>,
    losers: Vec<Quote>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.gainers.is_empty() && self.losers.is_empty()
    }
}
