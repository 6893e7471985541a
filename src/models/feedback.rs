//! Patient feedback model.

use serde::{Deserialize, Serialize};

use crate::store::{Entity, Resource};

/// Highest rating a feedback entry can carry.
pub const MAX_RATING: f32 = 5.0;

/// Feedback left by a patient, optionally shown on the public website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub rating: f32,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub show_on_website: bool,
}

/// Star breakdown used to render a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarSplit {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl Feedback {
    /// Split the rating into full, half and empty stars out of five.
    pub fn stars(&self) -> StarSplit {
        let rating = if self.rating.is_finite() {
            self.rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        };
        let full = rating.floor() as u8;
        let half = rating.fract() >= 0.5;
        let empty = MAX_RATING as u8 - full - u8::from(half);
        StarSplit { full, half, empty }
    }

    /// Email shortened to its local part, as shown on feedback cards.
    pub fn masked_email(&self) -> String {
        match self.email.split_once('@') {
            Some((local, _)) => format!("{}@...", local),
            None => self.email.clone(),
        }
    }
}

/// Request body for submitting feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackInput {
    pub name: String,
    pub rating: f32,
    pub email: String,
    pub comments: String,
    #[serde(default)]
    pub show_on_website: bool,
}

/// In-place changes the feedback store applies to a single entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackChange {
    /// The API's copy after flipping `show_on_website`; it replaces ours.
    VisibilityToggled(Feedback),
}

impl Entity for Feedback {
    type Key = String;
    type Change = FeedbackChange;

    fn key(&self) -> &String {
        &self.id
    }

    fn apply(&mut self, change: FeedbackChange) {
        match change {
            FeedbackChange::VisibilityToggled(feedback) => *self = feedback,
        }
    }
}

impl Resource for Feedback {
    type Input = FeedbackInput;

    const COLLECTION: &'static str = "/feedback";
    const CREATE_PATH: &'static str = "submit";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback(rating: f32) -> Feedback {
        Feedback {
            id: "1".to_string(),
            name: "Nimal".to_string(),
            rating,
            email: "nimal@example.com".to_string(),
            comments: "Great care".to_string(),
            show_on_website: false,
        }
    }

    #[test]
    fn test_whole_rating() {
        let split = feedback(4.0).stars();
        assert_eq!(split, StarSplit { full: 4, half: false, empty: 1 });
    }

    #[test]
    fn test_half_star() {
        let split = feedback(3.5).stars();
        assert_eq!(split, StarSplit { full: 3, half: true, empty: 1 });

        let split = feedback(2.4).stars();
        assert_eq!(split, StarSplit { full: 2, half: false, empty: 3 });
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(feedback(7.0).stars(), StarSplit { full: 5, half: false, empty: 0 });
        assert_eq!(feedback(-1.0).stars(), StarSplit { full: 0, half: false, empty: 5 });
        assert_eq!(feedback(f32::NAN).stars(), StarSplit { full: 0, half: false, empty: 5 });
    }

    #[test]
    fn test_masked_email() {
        assert_eq!(feedback(1.0).masked_email(), "nimal@...");
    }
}
