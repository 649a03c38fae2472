// src/services/mod.rs
pub mod cash_flow;
pub mod dcf;
pub mod input;
pub mod report;
pub mod source;
pub mod valuation;
pub mod yahoo;
