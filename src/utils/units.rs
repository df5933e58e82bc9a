//! Temperature unit conversion.
//!
//! Results are rounded to one decimal place with ties going to the even
//! neighbour, so `f2c(50.0)` is `10.0` and `f2c(33.0)` is `0.6`.

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Fahrenheit to Celsius, rounded to one decimal.
pub fn f2c(temp: f64) -> f64 {
    round_one_decimal((temp - 32.0) * 5.0 / 9.0)
}

/// Celsius to Fahrenheit, rounded to one decimal.
pub fn c2f(temp: f64) -> f64 {
    round_one_decimal((temp * 9.0 / 5.0) + 32.0)
}

/// [`f2c`] over a possibly missing reading.
pub fn f2c_opt(temp: Option<f64>) -> Option<f64> {
    temp.map(f2c)
}

/// [`c2f`] over a possibly missing reading.
pub fn c2f_opt(temp: Option<f64>) -> Option<f64> {
    temp.map(c2f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f2c_known_values() {
        assert_eq!(f2c(32.0), 0.0);
        assert_eq!(f2c(212.0), 100.0);
        assert_eq!(f2c(50.0), 10.0);
        assert_eq!(f2c(-40.0), -40.0);
        assert_eq!(f2c(70.0), 21.1);
    }

    #[test]
    fn test_c2f_known_values() {
        assert_eq!(c2f(0.0), 32.0);
        assert_eq!(c2f(100.0), 212.0);
        assert_eq!(c2f(-40.0), -40.0);
        assert_eq!(c2f(21.1), 70.0);
    }

    #[test]
    fn test_round_trip_one_decimal() {
        for tenths in -600..=600 {
            let x = f64::from(tenths) / 10.0;
            assert_eq!(
                round_one_decimal(f2c(c2f(x))),
                round_one_decimal(x),
                "round trip failed for {}",
                x
            );
        }
    }

    #[test]
    fn test_missing_passes_through() {
        assert_eq!(f2c_opt(None), None);
        assert_eq!(c2f_opt(None), None);
        assert_eq!(f2c_opt(Some(50.0)), Some(10.0));
    }

    #[test]
    fn test_nan_propagates() {
        assert!(f2c(f64::NAN).is_nan());
        assert!(c2f(f64::NAN).is_nan());
    }
}
