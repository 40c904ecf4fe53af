// src/core/mod.rs — Bounded refinement core

pub mod controller;
pub mod steps;
pub mod types;
