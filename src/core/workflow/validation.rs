//! Step Validation
//!
//! Each step validates only its own payload and reports every problem it
//! finds as a human-readable message. An empty list means the step is complete.

use super::types::{
    BasicInfoData, CustomizationData, FaithIntegrationData, FinalReviewData, StepData,
    TemplateData, TopicData,
};

pub const MIN_GRADE: u8 = 1;
pub const MAX_GRADE: u8 = 12;
pub const MIN_MINUTES: u32 = 5;
pub const MAX_MINUTES: u32 = 180;
pub const MIN_TOPIC_LEN: usize = 3;
pub const MIN_TITLE_LEN: usize = 3;
pub const MAX_FAITH_LEVEL: u8 = 3;

/// Validate a step payload.
pub fn validate_step(data: &StepData) -> Vec<String> {
    match data {
        StepData::BasicInfo(d) => validate_basic_info(d),
        StepData::Topic(d) => validate_topic(d),
        StepData::FaithIntegration(d) => validate_faith_integration(d),
        StepData::Customization(d) => validate_customization(d),
        StepData::Template(d) => validate_template(d),
        StepData::FinalReview(d) => validate_final_review(d),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_basic_info(data: &BasicInfoData) -> Vec<String> {
    let mut errors = Vec::new();
    if !(MIN_GRADE..=MAX_GRADE).contains(&data.grade_level) {
        errors.push(format!(
            "Grade level must be between {} and {}",
            MIN_GRADE, MAX_GRADE
        ));
    }
    if is_blank(&data.subject) {
        errors.push("Subject is required".to_string());
    }
    if !(MIN_MINUTES..=MAX_MINUTES).contains(&data.estimated_minutes) {
        errors.push(format!(
            "Estimated time must be between {} and {} minutes",
            MIN_MINUTES, MAX_MINUTES
        ));
    }
    errors
}

pub fn validate_topic(data: &TopicData) -> Vec<String> {
    let mut errors = Vec::new();
    if data.topic.trim().chars().count() < MIN_TOPIC_LEN {
        errors.push(format!("Topic must be at least {} characters", MIN_TOPIC_LEN));
    }
    if data.learning_objectives.iter().all(|o| is_blank(o)) {
        errors.push("At least one learning objective is required".to_string());
    }
    errors
}

pub fn validate_faith_integration(data: &FaithIntegrationData) -> Vec<String> {
    let mut errors = Vec::new();
    if data.level > MAX_FAITH_LEVEL {
        errors.push(format!("Faith level must be between 0 and {}", MAX_FAITH_LEVEL));
    } else if data.level > 0 && data.denomination.as_deref().map_or(true, is_blank) {
        errors.push("Denomination is required when faith content is included".to_string());
    }
    errors
}

pub fn validate_customization(data: &CustomizationData) -> Vec<String> {
    let mut errors = Vec::new();
    if is_blank(&data.difficulty) {
        errors.push("Difficulty is required".to_string());
    }
    if is_blank(&data.style) {
        errors.push("Style is required".to_string());
    }
    errors
}

pub fn validate_template(data: &TemplateData) -> Vec<String> {
    let mut errors = Vec::new();
    if is_blank(&data.template_id) {
        errors.push("Template is required".to_string());
    }
    if is_blank(&data.name) {
        errors.push("Template name is required".to_string());
    }
    if is_blank(&data.category) {
        errors.push("Template category is required".to_string());
    }
    errors
}

pub fn validate_final_review(data: &FinalReviewData) -> Vec<String> {
    if data.title.trim().chars().count() < MIN_TITLE_LEN {
        vec![format!("Title must be at least {} characters", MIN_TITLE_LEN)]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn basic_info(grade_level: u8, estimated_minutes: u32) -> BasicInfoData {
        BasicInfoData {
            grade_level,
            subject: "Math".to_string(),
            estimated_minutes,
        }
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(6, true)]
    #[case(12, true)]
    #[case(13, false)]
    fn test_grade_bounds(#[case] grade: u8, #[case] valid: bool) {
        assert_eq!(validate_basic_info(&basic_info(grade, 45)).is_empty(), valid);
    }

    #[rstest]
    #[case(4, false)]
    #[case(5, true)]
    #[case(180, true)]
    #[case(181, false)]
    fn test_minutes_bounds(#[case] minutes: u32, #[case] valid: bool) {
        assert_eq!(validate_basic_info(&basic_info(3, minutes)).is_empty(), valid);
    }

    #[test]
    fn test_basic_info_reports_every_problem() {
        let data = BasicInfoData {
            grade_level: 0,
            subject: "  ".to_string(),
            estimated_minutes: 0,
        };
        assert_eq!(validate_basic_info(&data).len(), 3);
    }

    #[rstest]
    #[case("ab", false)]
    #[case("  ab  ", false)]
    #[case("abc", true)]
    fn test_topic_length(#[case] topic: &str, #[case] valid: bool) {
        let data = TopicData {
            topic: topic.to_string(),
            learning_objectives: vec!["Add fractions".to_string()],
            keywords: Vec::new(),
        };
        assert_eq!(validate_topic(&data).is_empty(), valid);
    }

    #[test]
    fn test_topic_requires_objective() {
        let data = TopicData {
            topic: "Fractions".to_string(),
            learning_objectives: vec![" ".to_string()],
            keywords: Vec::new(),
        };
        assert_eq!(validate_topic(&data).len(), 1);
    }

    #[rstest]
    #[case(0, None, true)]
    #[case(1, None, false)]
    #[case(2, Some(""), false)]
    #[case(3, Some("Lutheran"), true)]
    #[case(4, Some("Lutheran"), false)]
    fn test_faith_level(#[case] level: u8, #[case] denomination: Option<&str>, #[case] valid: bool) {
        let data = FaithIntegrationData {
            level,
            denomination: denomination.map(str::to_string),
            scripture_translation: None,
        };
        assert_eq!(validate_faith_integration(&data).is_empty(), valid);
    }

    #[test]
    fn test_customization_and_template_required_fields() {
        let custom = CustomizationData {
            difficulty: String::new(),
            style: String::new(),
            problem_count: 10,
            include_answer_key: false,
        };
        assert_eq!(validate_customization(&custom).len(), 2);

        let template = TemplateData {
            template_id: "worksheet-basic".to_string(),
            name: String::new(),
            category: "worksheet".to_string(),
        };
        assert_eq!(validate_template(&template), vec!["Template name is required"]);
    }

    #[test]
    fn test_final_review_title() {
        let short = FinalReviewData {
            title: " Hi ".to_string(),
            notes: None,
        };
        assert_eq!(validate_final_review(&short).len(), 1);
        let ok = FinalReviewData {
            title: "Fractions Fun".to_string(),
            notes: None,
        };
        assert!(validate_final_review(&ok).is_empty());
    }
}
