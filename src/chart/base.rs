//! Base constants and utility functions for the chart module.

use plotters::style::RGBColor;

use crate::error::{LabError, LabResult};

// Chart colors
pub const WHITE_COLOR: RGBColor = RGBColor(255, 255, 255);
pub const BLACK_COLOR: RGBColor = RGBColor(0, 0, 0);
pub const GREY_COLOR: RGBColor = RGBColor(100, 100, 100);
pub const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);

/// Default property cycle (`C0`..`C9`), the tab10 palette
pub const CYCLE_COLORS: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4), // blue
    RGBColor(0xff, 0x7f, 0x0e), // orange
    RGBColor(0x2c, 0xa0, 0x2c), // green
    RGBColor(0xd6, 0x27, 0x28), // red
    RGBColor(0x94, 0x67, 0xbd), // purple
    RGBColor(0x8c, 0x56, 0x4b), // brown
    RGBColor(0xe3, 0x77, 0xc2), // pink
    RGBColor(0x7f, 0x7f, 0x7f), // gray
    RGBColor(0xbc, 0xbd, 0x22), // olive
    RGBColor(0x17, 0xbe, 0xcf), // cyan
];

const CYCLE_NAMES: [&str; 10] = [
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

// Chart dimensions
pub const LINE_WIDTH: u32 = 2;
pub const MARGIN: u32 = 10;
pub const X_LABEL_AREA: u32 = 60;
pub const Y_LABEL_AREA: u32 = 70;
pub const FONT_FAMILY: &str = "sans-serif";

/// Fraction of the data span added on each side of an axis
pub const AXIS_MARGIN: f64 = 0.05;

/// Humanize a column name for axis labels.
///
/// Underscores become spaces and each word is title-cased: the first letter
/// after any non-letter is upper-cased and the rest are lower-cased, so
/// `cetes_1m` becomes `Cetes 1M`.
pub fn humanize_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut prev_is_letter = false;

    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_is_letter {
                label.extend(ch.to_lowercase());
            } else {
                label.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            label.push(ch);
            prev_is_letter = false;
        }
    }

    label
}

/// Row indices that carry an x tick label: `0, every, 2 * every, ...`
pub fn tick_indices(len: usize, every: usize) -> LabResult<Vec<usize>> {
    if every == 0 {
        return Err(LabError::InvalidArgument(
            "xticks_every must be a positive integer".to_string(),
        ));
    }
    Ok((0..len).step_by(every).collect())
}

/// Parse a color specification.
///
/// Accepts the property cycle (`C0`..`C9`), `tab:<name>`, single-letter codes
/// (`b g r c m y k w`), common color names and `#rgb` / `#rrggbb` hex.
pub fn parse_color(spec: &str) -> LabResult<RGBColor> {
    let trimmed = spec.trim();
    let lower = trimmed.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| LabError::InvalidColor(spec.to_string()));
    }

    if let Some(digit) = lower.strip_prefix('c') {
        if let Ok(ix) = digit.parse::<usize>() {
            return CYCLE_COLORS
                .get(ix)
                .copied()
                .ok_or_else(|| LabError::InvalidColor(spec.to_string()));
        }
    }

    if let Some(name) = lower.strip_prefix("tab:") {
        return CYCLE_NAMES
            .iter()
            .position(|n| *n == name || (name == "grey" && *n == "gray"))
            .map(|ix| CYCLE_COLORS[ix])
            .ok_or_else(|| LabError::InvalidColor(spec.to_string()));
    }

    let color = match lower.as_str() {
        "b" => RGBColor(0, 0, 255),
        "g" => RGBColor(0, 128, 0),
        "r" => RGBColor(255, 0, 0),
        "c" => RGBColor(0, 191, 191),
        "m" => RGBColor(191, 0, 191),
        "y" => RGBColor(191, 191, 0),
        "k" | "black" => BLACK_COLOR,
        "w" | "white" => WHITE_COLOR,
        "blue" => RGBColor(0, 0, 255),
        "green" => RGBColor(0, 128, 0),
        "red" => RGBColor(255, 0, 0),
        "cyan" => RGBColor(0, 255, 255),
        "magenta" => RGBColor(255, 0, 255),
        "yellow" => RGBColor(255, 255, 0),
        "orange" => RGBColor(255, 165, 0),
        "purple" => RGBColor(128, 0, 128),
        "brown" => RGBColor(165, 42, 42),
        "pink" => RGBColor(255, 192, 203),
        "gray" | "grey" => RGBColor(128, 128, 128),
        "olive" => RGBColor(128, 128, 0),
        "navy" => RGBColor(0, 0, 128),
        "teal" => RGBColor(0, 128, 128),
        _ => return Err(LabError::InvalidColor(spec.to_string())),
    };
    Ok(color)
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])?;
            let g = channel(&hex[1..2])?;
            let b = channel(&hex[2..3])?;
            Some(RGBColor(r * 17, g * 17, b * 17))
        }
        6 => Some(RGBColor(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

/// Axis range covering every finite value with a margin on both sides.
///
/// A constant series is padded by 5% of its magnitude (or 1 around zero);
/// a series without finite values maps to `0..1`.
pub fn padded_range<'a, I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a Option<f64>>,
{
    let (min, max) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    if span > 0.0 {
        let pad = span * AXIS_MARGIN;
        (min - pad, max + pad)
    } else {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * AXIS_MARGIN };
        (min - pad, max + pad)
    }
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    if min_val >= max_val || max_ticks == 0 {
        return vec![min_val];
    }

    let range = max_val - min_val;
    let rough_step = range / max_ticks as f64;

    // Find the magnitude of the step
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    // Choose a nice step value
    let nice_step = if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let mut ticks = Vec::new();
    let mut value = (min_val / nice_step).ceil() * nice_step;

    while value <= max_val {
        ticks.push(value);
        value += nice_step;
    }

    ticks
}

/// Format an axis value with precision matched to the tick step
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{:.prec$}", value, prec = decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_label() {
        assert_eq!(humanize_label("inpc"), "Inpc");
        assert_eq!(humanize_label("exchange_rate_usd"), "Exchange Rate Usd");
        assert_eq!(humanize_label("official_interest_rate_usa"), "Official Interest Rate Usa");
        assert_eq!(humanize_label("cetes_1m"), "Cetes 1M");
        assert_eq!(humanize_label("GDP_growth"), "Gdp Growth");
        assert_eq!(humanize_label(""), "");
    }

    #[test]
    fn test_tick_indices() {
        assert_eq!(tick_indices(12, 4).unwrap(), vec![0, 4, 8]);
        assert_eq!(tick_indices(13, 12).unwrap(), vec![0, 12]);
        assert_eq!(tick_indices(3, 12).unwrap(), vec![0]);
        assert!(tick_indices(0, 12).unwrap().is_empty());
        assert!(matches!(tick_indices(12, 0), Err(LabError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_cycle_colors() {
        assert_eq!(parse_color("C0").unwrap(), RGBColor(0x1f, 0x77, 0xb4));
        assert_eq!(parse_color("C1").unwrap(), RGBColor(0xff, 0x7f, 0x0e));
        assert_eq!(parse_color("tab:green").unwrap(), CYCLE_COLORS[2]);
        assert!(parse_color("C10").is_err());
    }

    #[test]
    fn test_parse_named_and_hex_colors() {
        assert_eq!(parse_color("k").unwrap(), BLACK_COLOR);
        assert_eq!(parse_color("Red").unwrap(), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#ff8800").unwrap(), RGBColor(255, 136, 0));
        assert_eq!(parse_color("#f80").unwrap(), RGBColor(255, 136, 0));
        assert!(matches!(parse_color("#ggg"), Err(LabError::InvalidColor(_))));
        assert!(matches!(parse_color("not-a-color"), Err(LabError::InvalidColor(_))));
    }

    #[test]
    fn test_padded_range() {
        let close = |a: (f64, f64), b: (f64, f64)| (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9;

        let values = vec![Some(0.0), None, Some(10.0), Some(f64::NAN)];
        assert!(close(padded_range(&values), (-0.5, 10.5)));

        let constant = vec![Some(100.0); 4];
        assert!(close(padded_range(&constant), (95.0, 105.0)));

        let zeros = vec![Some(0.0); 2];
        assert_eq!(padded_range(&zeros), (-1.0, 1.0));

        let empty: Vec<Option<f64>> = vec![None, None];
        assert_eq!(padded_range(&empty), (0.0, 1.0));
    }

    #[test]
    fn test_calculate_axis_ticks() {
        let ticks = calculate_axis_ticks(0.0, 100.0, 5);
        assert!(!ticks.is_empty());
        for tick in &ticks {
            assert!(*tick >= 0.0 && *tick <= 100.0);
        }
        assert_eq!(calculate_axis_ticks(5.0, 5.0, 5), vec![5.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(17.26, 0.5), "17.3");
        assert_eq!(format_tick(100.0, 20.0), "100");
        assert_eq!(format_tick(0.126, 0.05), "0.13");
    }
}
