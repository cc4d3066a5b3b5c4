pub mod cli;
pub mod detect;
pub mod error;
pub mod github;
pub mod ingest;
pub mod model;
pub mod parsers;
pub mod report;
