//! Instruction text for timeframe extraction.

use vitals_core::HourBucketKey;

/// Keys the model must return, in order.
pub const AILMENT_KEY: &str = "health_ailment";
pub const START_KEY: &str = "start_date";
pub const END_KEY: &str = "end_date";

/// Build the system instruction with `anchor` fixed as the present date.
///
/// The anchor appears twice: once as "today" for resolving implied end dates,
/// once as the explicit `end_date` for relative expressions.
pub fn system_prompt(anchor: &HourBucketKey) -> String {
    format!(
        "Assume the present date is {anchor} if the end date is implied. \
         Extract the {AILMENT_KEY} and the start and end dates (timeframe) from this query. \
         Return ONLY JSON format: {{\"{AILMENT_KEY}\": \"...\", \"{START_KEY}\": \"%Y-%m-%dT%H\", \"{END_KEY}\": \"%Y-%m-%dT%H\"}}. \
         Dates must be in the format %Y-%m-%dT%H (for example: 2019-12-06T19). \
         If only one date is given then {START_KEY} = {END_KEY}. \
         If the query mentions a relative timeframe (such as 'since last week', 'for the past month', 'recently', etc.), \
         infer the {START_KEY} based on the present date and the described period, and set {END_KEY} to {anchor}."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> String {
        system_prompt(&HourBucketKey::parse("2019-12-06T19").unwrap())
    }

    #[test]
    fn fixes_present_date() {
        let p = prompt();
        assert!(p.starts_with("Assume the present date is 2019-12-06T19"));
        assert!(p.ends_with("set end_date to 2019-12-06T19."));
    }

    #[test]
    fn demands_exact_three_key_object() {
        let p = prompt();
        assert!(p.contains(
            r#"{"health_ailment": "...", "start_date": "%Y-%m-%dT%H", "end_date": "%Y-%m-%dT%H"}"#
        ));
        assert!(p.contains("Return ONLY JSON"));
    }

    #[test]
    fn single_date_means_equal_bounds() {
        assert!(prompt().contains("If only one date is given then start_date = end_date."));
    }

    #[test]
    fn relative_timeframes_are_anchored() {
        let p = prompt();
        assert!(p.contains("'since last week'"));
        assert!(p.contains("'for the past month'"));
        assert!(p.contains("infer the start_date based on the present date"));
    }
}
