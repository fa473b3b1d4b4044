//! Pure building layout generation for storeygen.
//!
//! This crate lays out multi-storey buildings on a rectangular plot: rooms
//! branching off each other on the ground floor, doors on shared walls,
//! one stairwell per floor, rooms stacked upward, balconies, roofs merged
//! over runs of matching rooms, outside doors and windows. Everything is plain
//! data driven by a seeded random stream, with no engine or renderer involved.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`balcony`] | Top-floor balcony selection |
//! | [`builder`] | Ground-floor room placement with overlap rejection |
//! | [`config`] | Generation parameters, defaults and validation |
//! | [`connection`] | Doors and stairs between rooms |
//! | [`direction`] | Closed direction/wall enums and per-room blocked flags |
//! | [`doors`] | Door-pruning walk and open-door reachability |
//! | [`error`] | Bounded-search outcomes and generation errors |
//! | [`fixtures`] | Outside doors and windows |
//! | [`generator`] | Full generation pipeline and the `Building` result |
//! | [`geometry`] | Vectors, transforms, rectangles, float tolerances |
//! | [`plan`] | Room/connection tables per floor, adjacency discovery |
//! | [`roof`] | Standalone and merged roof regions |
//! | [`room`] | Room rectangles and wall geometry |
//! | [`validation`] | Layout invariant checks |
//! | [`vertical`] | Stairwells and stacked upper-floor rooms |

pub mod balcony;
pub mod builder;
pub mod config;
pub mod connection;
pub mod direction;
pub mod doors;
pub mod error;
pub mod fixtures;
pub mod generator;
pub mod geometry;
pub mod plan;
pub mod roof;
pub mod room;
pub mod validation;
pub mod vertical;
