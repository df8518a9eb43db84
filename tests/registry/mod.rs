//! Registry tests.

mod preemption_test;
