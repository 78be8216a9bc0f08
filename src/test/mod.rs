mod coingecko;
mod config;
mod ranker;
mod server;
mod support;
