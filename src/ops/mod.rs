pub mod filter;
pub mod freshness;
