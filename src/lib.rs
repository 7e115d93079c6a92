//! Traffic Simulation Library
//!
//! A Nagel–Schreckenberg traffic simulation on a ring road with reactive
//! street lighting, runnable headless from the command line.

pub mod simulation;
