use crate::models::patient::Sex;

/// Estimated GFR via the CKD-EPI 2021 creatinine equation (race-free).
///
/// ```text
/// eGFR = 142 × min(Scr/κ, 1)^α × max(Scr/κ, 1)^−1.200 × 0.9938^age × s
/// ```
///
/// with κ = 0.7 (female) / 0.9 (male), α = −0.241 (female) / −0.302 (male)
/// and s = 1.012 (female) / 1.0 (male). The constants and exponents are the
/// published ones — any deviation changes clinical output.
///
/// Returns 0 when creatinine or age is not positive (undefined, hidden
/// from display).
pub fn ckd_epi_2021(creatinine_mg_dl: f64, age_years: f64, sex: Sex) -> f64 {
    if creatinine_mg_dl <= 0.0 || age_years <= 0.0 {
        return 0.0;
    }

    let (kappa, alpha, sex_factor) = match sex {
        Sex::Female => (0.7, -0.241, 1.012),
        Sex::Male => (0.9, -0.302, 1.0),
    };

    let ratio = creatinine_mg_dl / kappa;
    let min_term = ratio.min(1.0).powf(alpha);
    let max_term = ratio.max(1.0).powf(-1.200);
    let age_term = 0.9938_f64.powf(age_years);

    142.0 * min_term * max_term * age_term * sex_factor
}
