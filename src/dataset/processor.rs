//! Column transforms used to engineer features from macroeconomic series.
//!
//! Columns are pulled out of the frame as `Vec<Option<f64>>`, transformed, and
//! written back. Missing values propagate through every transform.

use polars::prelude::*;
use std::f64::consts::PI;

/// Read a column as nullable `f64` values.
///
/// Integer, boolean and numeric string columns are cast; a value that cannot be
/// represented as `f64` fails the cast instead of silently becoming null.
/// NaN counts as missing, the same as null.
pub fn column_values(df: &DataFrame, col_name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(col_name)?.strict_cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Insert or replace a column with the given values
pub fn set_column(df: &mut DataFrame, col_name: &str, values: Vec<Option<f64>>) -> PolarsResult<()> {
    let series = Series::new(col_name.into(), values);
    df.with_column(series)?;
    Ok(())
}

/// Shift values down by `periods` rows, leaving the first rows missing
pub fn shift(values: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    let len = values.len();
    let lead = periods.min(len);
    let mut shifted = vec![None; lead];
    shifted.extend_from_slice(&values[..len - lead]);
    shifted
}

/// Replace every missing value with the next available value below it.
///
/// Trailing missing values have nothing to fill from and stay missing.
pub fn backfill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut filled = values.to_vec();
    let mut next = None;
    for value in filled.iter_mut().rev() {
        match value {
            Some(v) => next = Some(*v),
            None => *value = next,
        }
    }
    filled
}

/// Lag a series by `periods` rows and back-fill the gap it opens
pub fn lag_backfill(values: &[Option<f64>], periods: usize) -> Vec<Option<f64>> {
    backfill(&shift(values, periods))
}

/// Element-wise `numerator / (denominator + epsilon)`
pub fn regularized_ratio(
    numerator: &[Option<f64>],
    denominator: &[Option<f64>],
    epsilon: f64,
) -> Vec<Option<f64>> {
    numerator
        .iter()
        .zip(denominator)
        .map(|(num, den)| Some((*num)? / ((*den)? + epsilon)))
        .collect()
}

/// Map a periodic value onto the unit circle, returning `(sin, cos)` columns
pub fn cyclical_encode(values: &[Option<f64>], period: f64) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    values
        .iter()
        .map(|value| match value {
            Some(v) => {
                let angle = 2.0 * PI * v / period;
                (Some(angle.sin()), Some(angle.cos()))
            }
            None => (None, None),
        })
        .unzip()
}

/// Raise every value to an integer power
pub fn power(values: &[Option<f64>], exponent: i32) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(|x| x.powi(exponent))).collect()
}

/// `ln(1 + |x|)` for every value
pub fn log1p_abs(values: &[Option<f64>]) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(|x| x.abs().ln_1p())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_opens_leading_gap() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        assert_eq!(shift(&values, 1), vec![None, Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(shift(&values, 0), values);
        assert_eq!(shift(&values, 6), vec![None, None, None, None]);
        assert!(shift(&[], 3).is_empty());
    }

    #[test]
    fn test_backfill() {
        let values = vec![None, None, Some(3.0), None, Some(5.0), None];
        assert_eq!(
            backfill(&values),
            vec![Some(3.0), Some(3.0), Some(3.0), Some(5.0), Some(5.0), None]
        );
        assert_eq!(backfill(&[None, None]), vec![None, None]);
    }

    #[test]
    fn test_lag_backfill_uses_first_observation() {
        let values = vec![Some(10.0), Some(11.0), Some(12.0), Some(13.0)];
        assert_eq!(
            lag_backfill(&values, 3),
            vec![Some(10.0), Some(10.0), Some(10.0), Some(10.0)]
        );
        assert_eq!(
            lag_backfill(&values, 1),
            vec![Some(10.0), Some(10.0), Some(11.0), Some(12.0)]
        );
    }

    #[test]
    fn test_regularized_ratio_handles_zero_denominator() {
        let ratio = regularized_ratio(&[Some(18.0), Some(18.0), None], &[Some(2.0), Some(0.0), Some(1.0)], 1e-6);
        assert!((ratio[0].unwrap() - 18.0 / 2.000001).abs() < 1e-12);
        let regularized = ratio[1].unwrap();
        assert!(regularized.is_finite());
        assert!((regularized - 18.0 / 1e-6).abs() < 1e-3);
        assert_eq!(ratio[2], None);
    }

    #[test]
    fn test_cyclical_encode_months() {
        let (sin, cos) = cyclical_encode(&[Some(1.0), Some(3.0), Some(12.0), None], 12.0);
        assert!((sin[0].unwrap() - (PI / 6.0).sin()).abs() < 1e-12);
        assert!((cos[0].unwrap() - (PI / 6.0).cos()).abs() < 1e-12);
        assert!((sin[1].unwrap() - 1.0).abs() < 1e-12);
        assert!(sin[2].unwrap().abs() < 1e-12);
        assert!((cos[2].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!((sin[3], cos[3]), (None, None));
    }

    #[test]
    fn test_power_and_log1p_abs() {
        assert_eq!(power(&[Some(3.0), None], 2), vec![Some(9.0), None]);
        let logs = log1p_abs(&[Some(-18.0), Some(0.0)]);
        assert!((logs[0].unwrap() - 19.0_f64.ln()).abs() < 1e-12);
        assert_eq!(logs[1], Some(0.0));
    }

    #[test]
    fn test_column_values_casts_integers_and_strings() {
        let df = df!(
            "month" => &[1i64, 2, 3],
            "rate" => &["4.5", "5.0", "5.25"],
        )
        .unwrap();

        assert_eq!(column_values(&df, "month").unwrap(), vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(column_values(&df, "rate").unwrap(), vec![Some(4.5), Some(5.0), Some(5.25)]);
    }

    #[test]
    fn test_column_values_treats_nan_as_missing() {
        let df = df!("inpc" => &[f64::NAN, 101.0, f64::INFINITY]).unwrap();
        let values = column_values(&df, "inpc").unwrap();
        assert_eq!(values, vec![None, Some(101.0), Some(f64::INFINITY)]);
        assert_eq!(
            lag_backfill(&values, 1),
            vec![Some(101.0), Some(101.0), Some(101.0)]
        );
    }

    #[test]
    fn test_column_values_rejects_non_numeric_and_missing() {
        let df = df!("rate" => &["4.5", "n/a"]).unwrap();
        assert!(column_values(&df, "rate").is_err());
        assert!(matches!(
            column_values(&df, "inpc"),
            Err(PolarsError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_set_column_replaces_in_place() {
        let mut df = df!("t" => &[0i64, 1], "y" => &[0.0, 0.0]).unwrap();
        set_column(&mut df, "y", vec![Some(1.5), None]).unwrap();
        assert_eq!(df.get_column_names_str(), vec!["t", "y"]);
        assert_eq!(column_values(&df, "y").unwrap(), vec![Some(1.5), None]);
    }
}
