//! Star scoring.

use std::fmt;

use serde::Serialize;

/// Letter rank for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    /// Every star.
    S,
    /// At least 86%.
    A,
    /// At least 57%.
    B,
    /// At least 29%.
    C,
    /// Anything less.
    D,
}

impl Grade {
    /// Grade for a completion ratio in `0.0..=1.0`.
    #[must_use]
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio >= 1.0 {
            Self::S
        } else if ratio >= 0.86 {
            Self::A
        } else if ratio >= 0.57 {
            Self::B
        } else if ratio >= 0.29 {
            Self::C
        } else {
            Self::D
        }
    }

    /// Short remark shown next to the grade.
    #[must_use]
    pub fn note(self) -> &'static str {
        match self {
            Self::S => "Perfect run!",
            Self::A => "So close",
            Self::B => "Nice!",
            Self::C => "Warm-up clear",
            Self::D => "Practice mode",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(letter)
    }
}

/// Stars earned over scored scenes, with the resulting grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scorecard {
    /// Completed scored scenes.
    pub stars: usize,
    /// Scored scenes in the catalog.
    pub total_stars: usize,
    /// Rank.
    pub grade: Grade,
    /// Remark for the rank.
    pub note: String,
}

impl Scorecard {
    /// Scores `stars` out of `total_stars`. An empty total counts as a
    /// perfect run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(stars: usize, total_stars: usize) -> Self {
        let stars = stars.min(total_stars);
        let ratio = if total_stars == 0 {
            1.0
        } else {
            stars as f64 / total_stars as f64
        };
        let grade = Grade::for_ratio(ratio);
        Self {
            stars,
            total_stars,
            grade,
            note: grade.note().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds_are_inclusive() {
        assert_eq!(Scorecard::new(100, 100).grade, Grade::S);
        assert_eq!(Scorecard::new(86, 100).grade, Grade::A);
        assert_eq!(Scorecard::new(85, 100).grade, Grade::B);
        assert_eq!(Scorecard::new(57, 100).grade, Grade::B);
        assert_eq!(Scorecard::new(56, 100).grade, Grade::C);
        assert_eq!(Scorecard::new(29, 100).grade, Grade::C);
        assert_eq!(Scorecard::new(28, 100).grade, Grade::D);
    }

    #[test]
    fn test_seven_star_run() {
        // 6/7 falls just under the A threshold.
        assert_eq!(Scorecard::new(7, 7).grade, Grade::S);
        assert_eq!(Scorecard::new(6, 7).grade, Grade::B);
        assert_eq!(Scorecard::new(4, 7).grade, Grade::B);
        assert_eq!(Scorecard::new(3, 7).grade, Grade::C);
        assert_eq!(Scorecard::new(2, 7).grade, Grade::D);
    }

    #[test]
    fn test_note_matches_grade() {
        let card = Scorecard::new(0, 7);

        assert_eq!(card.grade, Grade::D);
        assert_eq!(card.note, "Practice mode");
        assert_eq!(Scorecard::new(7, 7).note, "Perfect run!");
    }

    #[test]
    fn test_empty_total_is_perfect_and_stars_are_capped() {
        assert_eq!(Scorecard::new(0, 0).grade, Grade::S);
        assert_eq!(Scorecard::new(9, 7).stars, 7);
    }

    #[test]
    fn test_serializes_grade_as_letter() {
        let json = serde_json::to_value(Scorecard::new(7, 7)).unwrap();

        assert_eq!(json["grade"], "S");
        assert_eq!(json["stars"], 7);
    }
}
