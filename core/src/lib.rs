//! Discovery pipeline for `lanscout`.
//!
//! The [`scanner::Orchestrator`] drives the stages in order: run the external
//! discovery sweep, parse its report into devices, enrich each device
//! (hostname, open ports, vendor label) and hand the result to the operator.
//! An opt-in stress run against one selected device closes the pipeline.

pub mod adapters;
pub mod discovery;
pub mod operator;
pub mod parser;
pub mod probe;
pub mod resolver;
pub mod scanner;
pub mod selection;
pub mod stress;
pub mod system;
pub mod vendors;
