/// Integration tests for the source registry against a file-backed store:
/// restart durability, legacy migration and the fetch-pipeline round trip.

mod durability;
mod helpers;
mod migration;
mod pipeline;
