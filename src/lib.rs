pub mod app;
pub mod chunk;
pub mod config;
pub mod domain;
pub mod error;
pub mod fasta;
pub mod fetch;
pub mod filter;
pub mod output;
pub mod pride;
pub mod proteins;
pub mod retrieve;
pub mod taxonomy;
