//! Grade Lookup
//!
//! Maps grade labels ("K", "3rd Grade", "Junior") and raw grade numbers to the
//! ordinal scale used by the classifiers: 0 for kindergarten through 12.
//! Anything unrecognized lands on mid-elementary.

use serde::{Deserialize, Deserializer};

/// Ordinal used when a grade cannot be recognized.
pub const DEFAULT_GRADE_ORDINAL: u8 = 5;

/// Highest recognized grade.
pub const MAX_GRADE: u8 = 12;

static NAMED_GRADES: &[(&str, u8)] = &[
    ("pre-k", 0),
    ("prek", 0),
    ("preschool", 0),
    ("k", 0),
    ("kindergarten", 0),
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("freshman", 9),
    ("sophomore", 10),
    ("junior", 11),
    ("senior", 12),
];

/// Ordinal for a numeric grade. Out-of-range values use the default.
pub fn grade_ordinal(grade: u8) -> u8 {
    if grade <= MAX_GRADE {
        grade
    } else {
        DEFAULT_GRADE_ORDINAL
    }
}

/// Ordinal for a free-form grade label.
pub fn grade_from_label(label: &str) -> u8 {
    let normalized = label.trim().to_lowercase();
    let stripped = normalized
        .trim_start_matches("grade")
        .trim_end_matches("grade")
        .trim();

    if let Some((_, ordinal)) = NAMED_GRADES.iter().find(|(name, _)| *name == stripped) {
        return *ordinal;
    }

    let digits: String = stripped.chars().take_while(|c| c.is_ascii_digit()).collect();
    let suffix = &stripped[digits.len()..];
    let suffix_ok = matches!(suffix, "" | "st" | "nd" | "rd" | "th");

    match digits.parse::<u8>() {
        Ok(n) if suffix_ok && n <= MAX_GRADE => n,
        _ => DEFAULT_GRADE_ORDINAL,
    }
}

/// Deserialize a grade given either as a number or as a label.
pub fn deserialize_grade<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GradeInput {
        Number(u64),
        Label(String),
    }

    Ok(match GradeInput::deserialize(deserializer)? {
        GradeInput::Number(n) => u8::try_from(n).map(grade_ordinal).unwrap_or(DEFAULT_GRADE_ORDINAL),
        GradeInput::Label(label) => grade_from_label(&label),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_labels() {
        assert_eq!(grade_from_label("K"), 0);
        assert_eq!(grade_from_label("Kindergarten"), 0);
        assert_eq!(grade_from_label("3rd Grade"), 3);
        assert_eq!(grade_from_label("Grade 11"), 11);
        assert_eq!(grade_from_label("junior"), 11);
        assert_eq!(grade_from_label("12"), 12);
    }

    #[test]
    fn test_unknown_grades_default_to_mid_elementary() {
        assert_eq!(grade_from_label("college"), DEFAULT_GRADE_ORDINAL);
        assert_eq!(grade_from_label("13th"), DEFAULT_GRADE_ORDINAL);
        assert_eq!(grade_from_label(""), DEFAULT_GRADE_ORDINAL);
        assert_eq!(grade_ordinal(40), DEFAULT_GRADE_ORDINAL);
        assert_eq!(grade_ordinal(9), 9);
    }

    #[test]
    fn test_deserialize_grade() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "deserialize_grade")]
            grade: u8,
        }

        let w: Wrapper = serde_json::from_str(r#"{"grade": 7}"#).unwrap();
        assert_eq!(w.grade, 7);
        let w: Wrapper = serde_json::from_str(r#"{"grade": "2nd grade"}"#).unwrap();
        assert_eq!(w.grade, 2);
        let w: Wrapper = serde_json::from_str(r#"{"grade": 300}"#).unwrap();
        assert_eq!(w.grade, DEFAULT_GRADE_ORDINAL);
    }
}
