//! the test_utils folder here will share utils or test components between
//! unit tests
mod common;
mod tracking_allocator;

pub use common::*;
pub use tracking_allocator::*;
