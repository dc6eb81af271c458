//! Browser and environment glue shared by the session services and pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Storage and navigation sit behind traits so the coordinator runs the same
//! way in the browser, in native consumers, and under test.

pub mod auth;
pub mod navigation;
pub mod storage;
