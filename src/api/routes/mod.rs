//! API Routes
//!
//! Route handlers organized by functionality.

pub mod aggregate;
pub mod charts;
pub mod health;
pub mod page;
