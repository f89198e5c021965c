//! Chore Rota - Weekly chore assignment with voluntary swaps
//!
//! This crate rotates household chores across a fixed-length cycle and then
//! improves each week's assignment through cyclic exchanges that leave every
//! participant at least as happy as before.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
