//! Route modules, one per resource.

pub mod countries;
pub mod datalake;
pub mod health;
pub mod names;
