use crate::errors::TrackerError;
use crate::models::{Gender, Profile, ProfileMetrics};

/// Daily deficit subtracted from maintenance to get the target.
pub const CALORIE_DEFICIT: i64 = 500;

/// Lower bound on the target. Applied for every goal, including weight gain.
pub const MIN_TARGET_CALORIES: i64 = 1200;

/// Mifflin-St Jeor resting energy expenditure in kcal/day.
///
/// Male: `10w + 6.25h - 5a + 5`, female: `10w + 6.25h - 5a - 161`.
pub fn mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: f64,
    gender: Gender,
) -> Result<f64, TrackerError> {
    require_positive("weight", weight_kg)?;
    require_positive("height", height_cm)?;
    require_positive("age", age)?;

    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    Ok(10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + offset)
}

pub fn compute_metrics(profile: &Profile) -> Result<ProfileMetrics, TrackerError> {
    let bmr = mifflin_st_jeor(
        profile.current_weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
    )?;
    require_positive("activity factor", profile.activity_factor)?;

    let maintenance_calories = (bmr * profile.activity_factor).round() as i64;
    let target_calories = (maintenance_calories - CALORIE_DEFICIT).max(MIN_TARGET_CALORIES);

    Ok(ProfileMetrics {
        bmr,
        maintenance_calories,
        target_calories,
    })
}

/// Checks every field a saved profile must satisfy.
pub fn validate_profile(profile: &Profile) -> Result<(), TrackerError> {
    compute_metrics(profile)?;
    require_positive("goal weight", profile.goal_weight_kg)
}

fn require_positive(field: &str, value: f64) -> Result<(), TrackerError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackerError::InvalidProfile(format!(
            "{field} must be a positive number, got {value}"
        )));
    }
    Ok(())
}
