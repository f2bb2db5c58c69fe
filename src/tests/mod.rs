//! Test modules for the tide predictor binary.

mod engine_tests;
