//! # dashmark
//!
//! Native host for the Dashmark extension shell. The shell sends one JSON
//! request per line and reads one JSON response per line.

pub mod host;
