/// Report publishing domain
///
/// Pure value types and rules for turning an IQ webhook event into a wiki
/// page. Nothing in here performs I/O.
pub mod domain;
