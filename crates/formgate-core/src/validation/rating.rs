use std::sync::LazyLock;

use formgate_types::RatingFieldOptions;
use regex::Regex;

use super::pattern_matches;
use crate::error::ValidateFieldError;

static RATING_FORMAT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$"));

/// A rating is a whole number from 1 up to the configured step count.
pub(super) fn validate(
    options: &RatingFieldOptions,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    let in_range = pattern_matches(&RATING_FORMAT, answer)
        && answer
            .parse::<u32>()
            .is_ok_and(|rating| rating <= options.rating_options.steps);
    if in_range {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "RatingValidator: answer is not a valid rating",
        ))
    }
}
