//! Parser chain tests.

mod chain_test;
