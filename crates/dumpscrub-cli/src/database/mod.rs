//! Database helpers used around dump normalization.
//!
//! These are thin conveniences over an SQLx pool supplied by the caller.
//! Nothing here registers drivers or opens connections on its own: install
//! the SQLx drivers and build the pool where the process starts, then pass it
//! in.

mod helpers;

pub use helpers::{database_name, query_column, query_value, DbError, QueryArg};
