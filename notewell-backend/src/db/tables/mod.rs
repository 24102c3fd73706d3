//! Table-specific `impl Database` blocks, split out of sqlite.rs.
//!
//! Each module covers one table. Note mutations and their version ledger
//! rows share a transaction, so those two modules cooperate.

mod notes;
mod shares;
mod users;
mod versions;
