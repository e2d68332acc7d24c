/// Maximum surplus bonus before clamping.
const MAX_SURPLUS_BONUS: f64 = 0.2;

/// Years-of-experience adequacy in [0, 1].
///
/// - No requirement (absent or zero) → 1.0.
/// - Meets it → `min(1, 1 + bonus)` with `bonus = min(0.2, surplus / 2r)`. The bonus
///   is always clamped away, so every qualifying candidate scores exactly 1.0.
/// - Falls short → `c / r`.
pub fn score_experience(candidate_years: f64, required_years: Option<f64>) -> f64 {
    let required = match required_years {
        Some(r) if r > 0.0 => r,
        _ => return 1.0,
    };

    if candidate_years >= required {
        let bonus = surplus_bonus(candidate_years, required);
        (1.0 + bonus).min(1.0)
    } else {
        (candidate_years / required).max(0.0)
    }
}

/// Unclamped surplus bonus. Not surfaced in the breakdown.
pub fn surplus_bonus(candidate_years: f64, required_years: f64) -> f64 {
    if required_years <= 0.0 || candidate_years <= required_years {
        return 0.0;
    }
    ((candidate_years - required_years) / (required_years * 2.0)).min(MAX_SURPLUS_BONUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_requirement_is_one_even_with_zero_years() {
        assert_eq!(score_experience(0.0, None), 1.0);
        assert_eq!(score_experience(12.0, None), 1.0);
        assert_eq!(score_experience(0.0, Some(0.0)), 1.0);
    }

    #[test]
    fn test_exact_requirement_is_one() {
        assert_eq!(score_experience(5.0, Some(5.0)), 1.0);
    }

    #[test]
    fn test_surplus_is_clamped_to_one() {
        assert_eq!(score_experience(20.0, Some(2.0)), 1.0);
        assert!((surplus_bonus(6.0, 4.0) - 0.2).abs() < 1e-12);
        assert!((surplus_bonus(5.0, 4.0) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_shortfall_is_linear() {
        assert!((score_experience(3.0, Some(4.0)) - 0.75).abs() < 1e-12);
        assert_eq!(score_experience(0.0, Some(3.0)), 0.0);
    }
}
