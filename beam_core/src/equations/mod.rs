//! # Structural Mechanics Equations
//!
//! Closed-form beam formulas used by the solvers, grouped by support condition.
//! Keeping them in one place allows checking each against its reference table
//! independently of the station sampling and load handling in `calculations`.
//!
//! ## Modules
//!
//! - [`simple`] - Simply-supported (pin-roller) span
//! - [`cantilever`] - Cantilever fixed at the left end
//! - [`fixed`] - Fixed-fixed and fixed-pinned spans
//!
//! ## Sign Conventions
//!
//! - **Loads**: Positive downward (gravity direction)
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Shear**: Positive when left side moves up relative to right
//! - **Deflection**: Positive downward
//! - **Reactions**: Positive upward (resisting gravity)
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition
//! - AISC Steel Construction Manual, Table 3-23

pub mod cantilever;
pub mod fixed;
pub mod simple;

pub use fixed::{
    fixed_fixed_point_deflection, fixed_fixed_point_end_moments, fixed_fixed_point_moment,
    fixed_fixed_point_reactions, fixed_fixed_point_shear, fixed_fixed_uniform_deflection,
    fixed_fixed_uniform_end_moments, fixed_fixed_uniform_moment, fixed_fixed_uniform_reactions,
    fixed_fixed_uniform_shear, fixed_pinned_point_deflection, fixed_pinned_point_end_moment,
    fixed_pinned_point_moment, fixed_pinned_point_reactions, fixed_pinned_point_shear,
    fixed_pinned_uniform_deflection, fixed_pinned_uniform_end_moment, fixed_pinned_uniform_moment,
    fixed_pinned_uniform_reactions, fixed_pinned_uniform_shear,
};
pub use simple::{
    moment_influence_ordinate, partial_uniform_moment, partial_uniform_reactions,
    partial_uniform_shear, point_load_deflection, point_load_moment, point_load_reactions,
    point_load_shear, uniform_load_deflection,
};
