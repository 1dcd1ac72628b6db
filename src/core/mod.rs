pub mod backup;
pub mod builder;
pub mod calendar;
pub mod del;
pub mod draft;
pub mod hierarchy;
pub mod ledger;
pub mod log;
pub mod operating;
pub mod org;
pub mod resolver;
pub mod save;
pub mod validation;
