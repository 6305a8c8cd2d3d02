//! Dataset module for macroeconomic feature tables
//! Provides feature engineering helpers and synthetic target generation

pub mod processor;
pub mod synthesizer;

pub use processor::{
    backfill,
    column_values,
    cyclical_encode,
    lag_backfill,
    log1p_abs,
    power,
    regularized_ratio,
    set_column,
    shift,
};
pub use synthesizer::{
    deterministic_component,
    synthesize,
    TargetSynthesizer,
    DERIVED_COLUMNS,
    REQUIRED_COLUMNS,
};
