/**
 * validation module
 *
 * - diagnostic: levels, error codes, records and results
 * - rules: per-element rules (model, compartment, species, parameter)
 * - duplicates: cross-element duplicate-use detection
 * - pipeline: Validator, options and report
 */

pub mod diagnostic;
pub mod duplicates;
pub mod pipeline;
pub mod rules;

pub use diagnostic::{Diagnostic, ErrorCode, Level, ValidationResult};
pub use duplicates::{annotation_index, check_duplicate_use};
pub use pipeline::{validate, LevelCounts, Stage, ValidationOptions, ValidationReport, Validator};
