use jiff::civil::Date;

/// Completed years between `dob` and `reference`.
///
/// Year difference, minus one when the reference month/day still precedes
/// the birthday. Can go negative for a reference before the birth date;
/// callers clamp if they need to.
pub fn completed_years(dob: Date, reference: Date) -> i16 {
    let mut age = reference.year() - dob.year();
    if (reference.month(), reference.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
