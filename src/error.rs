use thiserror::Error;

/// Rejections raised where user input enters the program.
///
/// The arithmetic in `time_utils` never fails; these only guard the form and
/// configuration boundary.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("invalid birth date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("life expectancy {0} is outside the supported range {min}..={max}", min = crate::person::MIN_LIFE_EXPECTANCY, max = crate::person::MAX_LIFE_EXPECTANCY)]
    LifeExpectancyOutOfRange(i32),
    #[error("invalid life expectancy {0:?}: expected a whole number of years")]
    InvalidLifeExpectancy(String),
    #[error("unknown view mode {0:?}: expected \"calendar\" or \"timeline\"")]
    InvalidViewMode(String),
    #[error("invalid questionnaire: {0}")]
    InvalidQuestionnaire(#[from] serde_json::Error),
}
