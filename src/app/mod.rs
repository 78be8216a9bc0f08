pub mod calc;
pub mod fetcher;
pub mod ranker;
pub mod report;
pub mod utils;

pub use fetcher::BatchFetcher;
pub use ranker::rank;
