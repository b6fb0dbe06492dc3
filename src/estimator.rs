//! estimator.rs
//!
//! Lifestyle questionnaire producing a life-expectancy estimate in years.
//!
//! Flat weighted sum: each answer is worth a fixed number of points, the total
//! is read against a 100 point scale and mapped onto an adjustment between
//! -10 and +8 years around a base of 82 (86 for women). Unanswered questions
//! are worth nothing. Answering everything perfectly overshoots the scale,
//! which is how the scoring has always behaved.

use serde::{Deserialize, Serialize};

use crate::error::LifeError;

const SCORE_SCALE: i64 = 100;
const BASE_YEARS: i64 = 82;
const BASE_YEARS_FEMALE: i64 = 86;

macro_rules! answer {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $wire:literal => $points:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub fn points(self) -> u32 {
                match self {
                    $($name::$variant => $points,)+
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

answer!(Education {
    Primary = "primary" => 2,
    Secondary = "secondary" => 5,
    Higher = "higher" => 10,
});

answer!(Income {
    Low = "low" => 2,
    Medium = "medium" => 5,
    High = "high" => 10,
});

answer!(
    /// Recreational drug use.
    Habit {
        Yes = "yes" => 0,
        Occasional = "occasional" => 5,
        No = "no" => 10,
    }
);

answer!(Smoking {
    Yes = "yes" => 0,
    Occasional = "occasional" => 5,
    No = "no" => 15,
});

answer!(Alcohol {
    Heavy = "heavy" => 0,
    Moderate = "moderate" => 5,
    Occasional = "occasional" => 8,
    Abstain = "none" => 10,
});

answer!(
    /// Sessions of exercise per week.
    Activity {
        Sedentary = "none" => 0,
        OneToTwo = "1-2" => 3,
        ThreeToFour = "3-4" => 7,
        FivePlus = "5+" => 10,
    }
);

answer!(SleepDuration {
    UnderFive = "under-5" => 0,
    FiveToSix = "5-6" => 2,
    SevenToEight = "7-8" => 5,
    OverEight = "over-8" => 3,
});

answer!(SleepQuality {
    Poor = "poor" => 0,
    Fair = "fair" => 3,
    Good = "good" => 5,
});

answer!(Diet {
    Unbalanced = "unbalanced" => 0,
    Average = "average" => 4,
    Balanced = "balanced" => 7,
    Healthy = "healthy" => 10,
});

answer!(ChronicIllness {
    Several = "several" => 0,
    One = "one" => 2,
    Healthy = "none" => 5,
});

answer!(Stress {
    Constant = "constant" => 0,
    Often = "often" => 1,
    Occasional = "occasional" => 3,
    Rare = "rare" => 5,
});

answer!(Environment {
    Polluted = "polluted" => 0,
    BigCity = "big-city" => 2,
    SmallTown = "small-town" => 3,
    Countryside = "countryside" => 5,
});

answer!(AirQuality {
    Poor = "poor" => 0,
    Average = "average" => 3,
    Good = "good" => 5,
});

answer!(SocialSupport {
    Weak = "weak" => 0,
    Moderate = "moderate" => 3,
    Strong = "strong" => 5,
});

answer!(
    /// Daily water intake: under 1L, 1-2L, over 2L.
    Water {
        Insufficient = "insufficient" => 0,
        Sufficient = "sufficient" => 3,
        Excellent = "excellent" => 5,
    }
);

answer!(Relaxation {
    Never = "none" => 0,
    Occasional = "occasional" => 3,
    Daily = "daily" => 5,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Questionnaire {
    /// Collected for context; does not change the estimate.
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub education: Option<Education>,
    pub income: Option<Income>,
    pub smoking: Option<Smoking>,
    pub alcohol: Option<Alcohol>,
    pub drugs: Option<Habit>,
    pub activity: Option<Activity>,
    pub sleep: Option<SleepDuration>,
    pub sleep_quality: Option<SleepQuality>,
    pub diet: Option<Diet>,
    pub bmi: Option<f64>,
    pub chronic_illness: Option<ChronicIllness>,
    pub stress: Option<Stress>,
    pub medical_checkups: Option<bool>,
    pub environment: Option<Environment>,
    pub air_quality: Option<AirQuality>,
    pub social_support: Option<SocialSupport>,
    pub water: Option<Water>,
    pub relaxation: Option<Relaxation>,
}

impl Questionnaire {
    pub fn from_json(json: &str) -> Result<Self, LifeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn score(&self) -> u32 {
        fn pts<T>(answer: Option<T>, points: fn(T) -> u32) -> u32 {
            answer.map(points).unwrap_or(0)
        }

        pts(self.education, Education::points)
            + pts(self.income, Income::points)
            + pts(self.smoking, Smoking::points)
            + pts(self.alcohol, Alcohol::points)
            + pts(self.drugs, Habit::points)
            + pts(self.activity, Activity::points)
            + pts(self.sleep, SleepDuration::points)
            + pts(self.sleep_quality, SleepQuality::points)
            + pts(self.diet, Diet::points)
            + bmi_points(self.bmi)
            + pts(self.chronic_illness, ChronicIllness::points)
            + pts(self.stress, Stress::points)
            + (if self.medical_checkups == Some(true) { 5 } else { 0 })
            + pts(self.environment, Environment::points)
            + pts(self.air_quality, AirQuality::points)
            + pts(self.social_support, SocialSupport::points)
            + pts(self.water, Water::points)
            + pts(self.relaxation, Relaxation::points)
    }

    /// Estimated life expectancy in whole years, halves rounded up.
    pub fn estimate(&self) -> i32 {
        let base = match self.gender {
            Some(Gender::Female) => BASE_YEARS_FEMALE,
            _ => BASE_YEARS,
        };
        // hundredths of a year: base + score / 100 * 18 - 10
        let hundredths = base * 100 + i64::from(self.score()) * 18 * 100 / SCORE_SCALE - 1000;
        (hundredths + 50).div_euclid(100) as i32
    }
}

fn bmi_points(bmi: Option<f64>) -> u32 {
    match bmi {
        Some(b) if b < 18.5 => 1,
        Some(b) if b < 25.0 => 5,
        Some(b) if b < 30.0 => 3,
        _ => 0,
    }
}
