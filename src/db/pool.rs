//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Run `func` inside an IMMEDIATE transaction: the write lock is taken
    /// up front, so concurrent savers queue instead of interleaving.
    /// Any error rolls everything back.
    pub fn write_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
