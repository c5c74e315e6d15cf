//! Adaptive-duration calculation (§4.H)
//!
//! Averages recent completion durations for a series, then clamps and
//! rounds to produce a duration estimate for scheduling purposes.

use crate::domain::entities::{AdaptiveDurationConfig, Completion, SampleMode};
use crate::domain::errors::CoreError;
use crate::domain::value_objects::calendar::add_days;
use crate::domain::value_objects::{LocalDate, Minutes};

/// `calculateAdaptiveDuration(series, config, asOf)` (§4.H).
///
/// Completions are expected pre-sorted newest-first by the caller when
/// `mode` is `LastN`; `WindowDays` filters by date and does not care about
/// order. Only completions with a known duration are used.
pub fn calculate_adaptive_duration(
    config: &AdaptiveDurationConfig,
    completions: &[Completion],
    as_of: LocalDate,
) -> Result<Minutes, CoreError> {
    validate(config)?;

    let durations: Vec<u32> = match config.mode {
        SampleMode::LastN(n) => completions
            .iter()
            .filter_map(|c| c.duration_minutes)
            .take(n as usize)
            .map(Minutes::value)
            .collect(),
        SampleMode::WindowDays(days) => {
            let window_start = add_days(as_of, -(i64::from(days) - 1));
            completions
                .iter()
                .filter(|c| c.instance_date >= window_start && c.instance_date <= as_of)
                .filter_map(|c| c.duration_minutes)
                .map(Minutes::value)
                .collect()
        }
    };

    if durations.is_empty() {
        return Ok(config.fallback);
    }

    let sum: f64 = durations.iter().map(|&d| f64::from(d)).sum();
    let mean = sum / durations.len() as f64;
    let scaled = mean * (f64::from(config.multiplier_milli) / 1000.0);

    let clamped = clamp(scaled, config.minimum, config.maximum);
    let rounded = round_half_to_even(clamped);
    Ok(Minutes::new(rounded.max(1.0) as u32))
}

fn validate(config: &AdaptiveDurationConfig) -> Result<(), CoreError> {
    if config.fallback.value() < 1 {
        return Err(CoreError::ValidationError(
            "adaptive duration fallback must be >= 1".to_string(),
        ));
    }
    if config.multiplier_milli == 0 {
        return Err(CoreError::ValidationError(
            "adaptive duration multiplier must be > 0".to_string(),
        ));
    }
    if let (Some(min), Some(max)) = (config.minimum, config.maximum) {
        if min > max {
            return Err(CoreError::ValidationError(format!(
                "adaptive duration minimum {min} exceeds maximum {max}"
            )));
        }
    }
    Ok(())
}

fn clamp(value: f64, minimum: Option<Minutes>, maximum: Option<Minutes>) -> f64 {
    let mut v = value;
    if let Some(min) = minimum {
        v = v.max(f64::from(min.value()));
    }
    if let Some(max) = maximum {
        v = v.min(f64::from(max.value()));
    }
    v
}

/// Ties round to the nearest even integer ("banker's rounding").
fn round_half_to_even(value: f64) -> f64 {
    let floor = value.floor();
    let diff = value - floor;
    if diff < 0.5 {
        floor
    } else if diff > 0.5 {
        floor + 1.0
    } else if (floor as i64) % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CompletionId, SeriesId};
    use crate::domain::value_objects::calendar::make_date;

    fn completion(date: LocalDate, duration: Option<u32>) -> Completion {
        Completion {
            id: CompletionId(1),
            series_id: SeriesId(1),
            instance_date: date,
            start_time: None,
            end_time: None,
            duration_minutes: duration.map(Minutes::new),
        }
    }

    fn base_config() -> AdaptiveDurationConfig {
        AdaptiveDurationConfig {
            series_id: SeriesId(1),
            mode: SampleMode::LastN(3),
            fallback: Minutes::new(30),
            multiplier_milli: 1000,
            minimum: None,
            maximum: None,
        }
    }

    #[test]
    fn empty_history_returns_fallback() {
        let config = base_config();
        let as_of = make_date(2024, 1, 1).unwrap();
        assert_eq!(calculate_adaptive_duration(&config, &[], as_of).unwrap().value(), 30);
    }

    #[test]
    fn averages_last_n_with_known_durations() {
        let config = base_config();
        let as_of = make_date(2024, 1, 10).unwrap();
        let completions = vec![
            completion(make_date(2024, 1, 9).unwrap(), Some(60)),
            completion(make_date(2024, 1, 8).unwrap(), Some(40)),
            completion(make_date(2024, 1, 7).unwrap(), Some(20)),
        ];
        let out = calculate_adaptive_duration(&config, &completions, as_of).unwrap();
        assert_eq!(out.value(), 40);
    }

    #[test]
    fn clamps_to_maximum() {
        let mut config = base_config();
        config.maximum = Some(Minutes::new(35));
        let as_of = make_date(2024, 1, 10).unwrap();
        let completions = vec![completion(make_date(2024, 1, 9).unwrap(), Some(60))];
        let out = calculate_adaptive_duration(&config, &completions, as_of).unwrap();
        assert_eq!(out.value(), 35);
    }

    #[test]
    fn rejects_inverted_clamp_bounds() {
        let mut config = base_config();
        config.minimum = Some(Minutes::new(50));
        config.maximum = Some(Minutes::new(10));
        let as_of = make_date(2024, 1, 1).unwrap();
        assert!(calculate_adaptive_duration(&config, &[], as_of).is_err());
    }

    #[test]
    fn floors_at_one() {
        let mut config = base_config();
        config.multiplier_milli = 1;
        let as_of = make_date(2024, 1, 10).unwrap();
        let completions = vec![completion(make_date(2024, 1, 9).unwrap(), Some(10))];
        let out = calculate_adaptive_duration(&config, &completions, as_of).unwrap();
        assert_eq!(out.value(), 1);
    }
}
