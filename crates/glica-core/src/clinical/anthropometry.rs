/// Body mass index, kg/m². Reports 0 when either input is not positive —
/// the caller suppresses display of an undefined value.
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    if weight_kg <= 0.0 || height_m <= 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

/// BMI band label (pt-BR). Empty for an undefined BMI.
///
/// Boundaries are strict `<` comparisons: a value exactly on a threshold
/// falls into the band above it (24.9 classifies as "Sobrepeso").
pub fn bmi_classification(bmi: f64) -> &'static str {
    if bmi <= 0.0 {
        ""
    } else if bmi < 18.5 {
        "Abaixo do peso"
    } else if bmi < 24.9 {
        "Peso normal"
    } else if bmi < 29.9 {
        "Sobrepeso"
    } else if bmi < 34.9 {
        "Obesidade Grau I"
    } else if bmi < 39.9 {
        "Obesidade Grau II"
    } else {
        "Obesidade Grau III"
    }
}
