//! Host-based tests for the ignition controller
//!
//! The core is synchronous polling logic, so everything here drives it
//! with explicit timestamps; no timer runtime is involved.

#[cfg(test)]
mod timing_tests;


#[cfg(test)]
mod limiter_tests;


#[cfg(test)]
mod adapter_tests;
