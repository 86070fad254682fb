use crate::domain::models::tenant::Plan;
use crate::error::AppError;

/// Gate for structural growth: a tenant may only add a location while its
/// active count is below the plan limit. Repositories call this inside the
/// same transaction as the insert so archive/re-create cannot overshoot.
pub fn ensure_can_create_location(plan: Plan, active_count: i64) -> Result<(), AppError> {
    let limit = plan.max_locations();
    if active_count >= limit {
        return Err(AppError::QuotaExceeded(format!(
            "Your plan allows up to {} active location(s). Upgrade to add more.",
            limit
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_plan_stops_at_one() {
        assert!(ensure_can_create_location(Plan::Basic, 0).is_ok());
        assert!(matches!(
            ensure_can_create_location(Plan::Basic, 1),
            Err(AppError::QuotaExceeded(_))
        ));
    }

    #[test]
    fn limits_scale_with_plan() {
        assert!(ensure_can_create_location(Plan::Pro, 2).is_ok());
        assert!(ensure_can_create_location(Plan::Pro, 3).is_err());
        assert!(ensure_can_create_location(Plan::Enterprise, 9).is_ok());
        assert!(ensure_can_create_location(Plan::Enterprise, 10).is_err());
    }
}
