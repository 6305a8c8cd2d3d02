//! Synthetic target generation for macroeconomic feature tables.
//!
//! The target is a fixed-weight blend of lagged inflation, a dampened lagged
//! exchange rate, the exchange-to-policy-rate ratio, month seasonality and a
//! quadratic trend, plus seeded Gaussian noise.

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, info};

use super::processor::{
    column_values, cyclical_encode, lag_backfill, log1p_abs, power, regularized_ratio, set_column,
};
use crate::error::{LabError, LabResult};

/// Consumer price index column
pub const INPC: &str = "inpc";
/// One-month CETES rate column
pub const CETES_1M: &str = "cetes_1m";
/// USD exchange rate column
pub const EXCHANGE_RATE_USD: &str = "exchange_rate_usd";
/// US policy rate column
pub const OFFICIAL_INTEREST_RATE_USA: &str = "official_interest_rate_usa";
/// Calendar month column (1..=12)
pub const MONTH: &str = "month";
/// Time index column
pub const TIME_INDEX: &str = "t";

/// Columns the synthesizer reads
pub const REQUIRED_COLUMNS: [&str; 6] = [
    INPC,
    CETES_1M,
    EXCHANGE_RATE_USD,
    OFFICIAL_INTEREST_RATE_USA,
    MONTH,
    TIME_INDEX,
];

pub const LAG_INPC_1: &str = "lag_inpc_1";
pub const LAG_CETES_3: &str = "lag_cetes_3";
pub const LAG_FX_6: &str = "lag_fx_6";
pub const FX_TO_FORECAST: &str = "fx_to_forecast";
pub const MONTH_SIN: &str = "month_sin";
pub const MONTH_COS: &str = "month_cos";
pub const T2: &str = "t2";

/// Columns added to every synthesized frame, in insertion order
pub const DERIVED_COLUMNS: [&str; 7] = [
    LAG_INPC_1,
    LAG_CETES_3,
    LAG_FX_6,
    FX_TO_FORECAST,
    MONTH_SIN,
    MONTH_COS,
    T2,
];

/// Default target column name
pub const DEFAULT_TARGET_NAME: &str = "y";
/// Default generator seed
pub const DEFAULT_SEED: u64 = 42;

/// Added to the policy rate before dividing
pub const RATIO_EPSILON: f64 = 1e-6;
/// Months per seasonal cycle
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// Standard deviation of the target noise
pub const NOISE_STD: f64 = 0.5;

pub const WEIGHT_LAG_INPC: f64 = 0.6;
pub const WEIGHT_LOG_FX: f64 = 0.4;
pub const WEIGHT_FX_RATIO: f64 = 0.3;
pub const WEIGHT_MONTH_SIN: f64 = 1.0;
pub const WEIGHT_TREND: f64 = 0.01;

/// Builds a synthetic target column on a copy of a feature frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSynthesizer {
    target_name: String,
    seed: u64,
}

impl Default for TargetSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetSynthesizer {
    /// Create a synthesizer writing to `"y"` with seed 42
    pub fn new() -> Self {
        Self {
            target_name: DEFAULT_TARGET_NAME.to_string(),
            seed: DEFAULT_SEED,
        }
    }

    /// Set the target column name (an existing column of that name is overwritten)
    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = target_name.into();
        self
    }

    /// Set the noise generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return a copy of `df` with the derived feature columns and the target.
    ///
    /// `df` itself is left untouched. Row count and order are preserved.
    pub fn synthesize(&self, df: &DataFrame) -> LabResult<DataFrame> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let noise = Normal::new(0.0, NOISE_STD)
            .map_err(|e| LabError::InvalidArgument(format!("noise distribution: {}", e)))?;

        // Resolve every input before writing anything so a bad frame fails as a whole
        let inpc = column_values(df, INPC)?;
        let cetes = column_values(df, CETES_1M)?;
        let fx = column_values(df, EXCHANGE_RATE_USD)?;
        let policy_rate = column_values(df, OFFICIAL_INTEREST_RATE_USA)?;
        let month = column_values(df, MONTH)?;
        let t = column_values(df, TIME_INDEX)?;

        let mut out = df.clone();

        let lag_inpc = lag_backfill(&inpc, 1);
        let lag_cetes = lag_backfill(&cetes, 3);
        let lag_fx = lag_backfill(&fx, 6);
        debug!(rows = out.height(), "computed lagged series");

        let fx_ratio = regularized_ratio(&fx, &policy_rate, RATIO_EPSILON);
        debug!("computed exchange to policy rate ratio");

        let (month_sin, month_cos) = cyclical_encode(&month, MONTHS_PER_YEAR);
        debug!("computed month seasonality");

        let t2 = power(&t, 2);
        debug!("computed squared time trend");

        let log_fx = log1p_abs(&lag_fx);
        let target: Vec<Option<f64>> = (0..out.height())
            .map(|i| {
                // Draw for every row so the noise sequence never depends on missing inputs
                let eps = noise.sample(&mut rng);
                Some(
                    WEIGHT_LAG_INPC * lag_inpc[i]?
                        + WEIGHT_LOG_FX * log_fx[i]?
                        + WEIGHT_FX_RATIO * fx_ratio[i]?
                        + WEIGHT_MONTH_SIN * month_sin[i]?
                        + WEIGHT_TREND * t2[i]?
                        + eps,
                )
            })
            .collect();

        set_column(&mut out, LAG_INPC_1, lag_inpc)?;
        set_column(&mut out, LAG_CETES_3, lag_cetes)?;
        set_column(&mut out, LAG_FX_6, lag_fx)?;
        set_column(&mut out, FX_TO_FORECAST, fx_ratio)?;
        set_column(&mut out, MONTH_SIN, month_sin)?;
        set_column(&mut out, MONTH_COS, month_cos)?;
        set_column(&mut out, T2, t2)?;
        set_column(&mut out, &self.target_name, target)?;

        info!(
            rows = out.height(),
            target = %self.target_name,
            seed = self.seed,
            "synthesized target column"
        );
        Ok(out)
    }
}

/// Synthesize `target_name` on a copy of `df` using noise seeded with `seed`
pub fn synthesize(df: &DataFrame, target_name: &str, seed: u64) -> LabResult<DataFrame> {
    TargetSynthesizer::new()
        .with_target_name(target_name)
        .with_seed(seed)
        .synthesize(df)
}

/// Noise-free part of the target for each row, from an already synthesized frame
pub fn deterministic_component(df: &DataFrame) -> LabResult<Vec<Option<f64>>> {
    let lag_inpc = column_values(df, LAG_INPC_1)?;
    let log_fx = log1p_abs(&column_values(df, LAG_FX_6)?);
    let fx_ratio = column_values(df, FX_TO_FORECAST)?;
    let month_sin = column_values(df, MONTH_SIN)?;
    let t2 = column_values(df, T2)?;

    Ok((0..df.height())
        .map(|i| {
            Some(
                WEIGHT_LAG_INPC * lag_inpc[i]?
                    + WEIGHT_LOG_FX * log_fx[i]?
                    + WEIGHT_FX_RATIO * fx_ratio[i]?
                    + WEIGHT_MONTH_SIN * month_sin[i]?
                    + WEIGHT_TREND * t2[i]?,
            )
        })
        .collect())
}
