//! Formatting of floats to a number of significant figures.

/// A float formatted to a number of significant figures, in the manner of the `g` presentation
/// type of Python's `format`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum General {
    /// Fixed-point notation, such as `0.0123`.
    Fixed(String),

    /// Scientific notation, with the mantissa and the power of ten.
    Scientific { mantissa: String, exponent: i32 },
}

impl General {
    /// Formats the value to the given number of significant figures. Zero figures are treated as
    /// one.
    pub fn format(value: f64, figures: usize) -> Self {
        if !value.is_finite() {
            let text = if value.is_nan() {
                "nan"
            } else if value > 0.0 {
                "inf"
            } else {
                "-inf"
            };
            return Self::Fixed(text.to_string());
        }

        let figures = figures.max(1);
        let scientific = format!("{:.*e}", figures - 1, value);
        let (mantissa, exponent) = match scientific.split_once('e') {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
            None => (scientific.as_str(), 0),
        };

        if exponent < -4 || exponent >= figures as i32 {
            Self::Scientific {
                mantissa: strip_zeros(mantissa).to_string(),
                exponent,
            }
        } else {
            let decimals = (figures as i32 - 1 - exponent).max(0) as usize;
            Self::Fixed(strip_zeros(&format!("{:.*}", decimals, value)).to_string())
        }
    }
}

/// Removes trailing zeros after the decimal point, and the point itself if nothing follows it.
fn strip_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn fixed(text: &str) -> General {
        General::Fixed(text.to_string())
    }

    fn scientific(mantissa: &str, exponent: i32) -> General {
        General::Scientific { mantissa: mantissa.to_string(), exponent }
    }

    #[test]
    fn fixed_point() {
        assert_eq!(General::format(3.14159, 3), fixed("3.14"));
        assert_eq!(General::format(0.5, 3), fixed("0.5"));
        assert_eq!(General::format(100.0, 3), fixed("100"));
        assert_eq!(General::format(0.000123456, 3), fixed("0.000123"));
        assert_eq!(General::format(-2.0, 2), fixed("-2"));
        assert_eq!(General::format(0.0, 3), fixed("0"));
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(General::format(1234.5, 3), scientific("1.23", 3));
        assert_eq!(General::format(0.0000123456, 3), scientific("1.23", -5));
        assert_eq!(General::format(1e16, 3), scientific("1", 16));
        assert_eq!(General::format(999.9, 3), scientific("1", 3));
    }

    #[test]
    fn zero_figures_means_one() {
        assert_eq!(General::format(3.7, 0), fixed("4"));
    }

    #[test]
    fn not_finite() {
        assert_eq!(General::format(f64::INFINITY, 3), fixed("inf"));
        assert_eq!(General::format(f64::NEG_INFINITY, 3), fixed("-inf"));
        assert_eq!(General::format(f64::NAN, 3), fixed("nan"));
    }
}
