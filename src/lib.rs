//! # Contract and quote rendering tool
#![warn(missing_docs)]

pub mod cli;
