use crate::errors::TrackerError;
use crate::models::{GoalProjection, Profile, Projection};
use chrono::{Duration, NaiveDate};

/// Weekly loss/gain options offered when the caller does not pick any, in kg/week.
pub const DEFAULT_RATES: [f64; 3] = [0.25, 0.5, 1.0];

/// Projects a target date per rate. Output keeps the order of `rates`.
pub fn project_goal_dates(
    current_weight_kg: f64,
    goal_weight_kg: f64,
    today: NaiveDate,
    rates: &[f64],
) -> Result<Vec<Projection>, TrackerError> {
    for (label, value) in [("current weight", current_weight_kg), ("goal weight", goal_weight_kg)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(TrackerError::InvalidProfile(format!(
                "{label} must be a positive number, got {value}"
            )));
        }
    }
    if let Some(&rate) = rates.iter().find(|rate| !rate.is_finite() || **rate <= 0.0) {
        return Err(TrackerError::InvalidRate(format!(
            "{rate} must be a positive kg/week value"
        )));
    }

    let diff = (current_weight_kg - goal_weight_kg).abs();
    rates
        .iter()
        .map(|&rate| {
            Ok(Projection {
                rate,
                projected_date: projected_date(today, diff, rate)?,
            })
        })
        .collect()
}

/// `today + ceil(diff / rate * 7)` days, or an error once the date leaves chrono's range.
fn projected_date(today: NaiveDate, diff: f64, rate: f64) -> Result<NaiveDate, TrackerError> {
    let out_of_range = || {
        TrackerError::InvalidRate(format!(
            "{rate} kg/week projects past the supported date range"
        ))
    };

    let days = (diff / rate * 7.0).ceil();
    if !days.is_finite() || days >= i64::MAX as f64 {
        return Err(out_of_range());
    }
    let offset = Duration::try_days(days as i64).ok_or_else(out_of_range)?;
    today.checked_add_signed(offset).ok_or_else(out_of_range)
}

/// Runs the projector from a stored profile and flags which rates reach the goal in time.
pub fn project_profile(
    profile: &Profile,
    today: NaiveDate,
    rates: &[f64],
) -> Result<Vec<GoalProjection>, TrackerError> {
    let projections = project_goal_dates(
        profile.current_weight_kg,
        profile.goal_weight_kg,
        today,
        rates,
    )?;

    Ok(projections
        .into_iter()
        .map(|projection| GoalProjection {
            rate: projection.rate,
            projected_date: projection.projected_date,
            meets_goal_date: projection.projected_date <= profile.goal_date,
        })
        .collect())
}

/// Parses a comma separated rate list such as `0.25,0.5,1`. Blank input yields the defaults.
pub fn parse_rates(raw: Option<&str>) -> Result<Vec<f64>, TrackerError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_RATES.to_vec());
    };

    raw.split(',')
        .map(|part| {
            let token = part.trim();
            token
                .parse::<f64>()
                .map_err(|_| TrackerError::InvalidRate(format!("'{token}' is not a number")))
        })
        .collect()
}
