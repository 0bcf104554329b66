//! Integration tests for mytail.

mod tail;
