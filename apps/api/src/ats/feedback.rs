//! Resume feedback: structural heuristics and optimization tips.
//!
//! Each check is independent. A perfect keyword score can still carry
//! formatting issues, and the tips are derived from the other outputs only.

use crate::ats::scoring::ScorerConfig;

/// Section headings suggested when the resume structure is flagged.
const SUGGESTED_SECTIONS: &[&str] = &["Summary", "Experience", "Education", "Skills"];

/// Flags structural problems with the resume text.
///
/// - fewer than `min_resume_len` characters → too short
/// - fewer than `min_resume_lines` newline-delimited lines → no section separation
pub fn formatting_issues(resume_text: &str, config: &ScorerConfig) -> Vec<String> {
    let mut issues = Vec::new();

    let char_count = resume_text.chars().count();
    if char_count < config.min_resume_len {
        issues.push(format!(
            "Resume is too short ({char_count} characters); aim for at least {} characters of content",
            config.min_resume_len
        ));
    }

    let line_count = resume_text.split('\n').count();
    if line_count < config.min_resume_lines {
        issues.push(format!(
            "Resume lacks section separation ({line_count} lines); split it into at least {} lines with distinct sections",
            config.min_resume_lines
        ));
    }

    issues
}

/// Builds improvement tips from the score, missing keywords and formatting issues.
pub fn optimization_tips(
    score: u32,
    missing_keywords: &[String],
    formatting_issues: &[String],
    config: &ScorerConfig,
) -> Vec<String> {
    let mut tips = Vec::new();

    if !missing_keywords.is_empty() {
        tips.push(missing_keywords_tip(
            missing_keywords,
            config.max_listed_keywords,
        ));
    }

    if score < config.target_score {
        tips.push(format!(
            "Add more relevant skills and experience from the job description to raise your score above {}",
            config.target_score
        ));
    }

    if !formatting_issues.is_empty() {
        tips.push(format!(
            "Improve resume structure with clear section headings ({})",
            SUGGESTED_SECTIONS.join(", ")
        ));
    }

    tips
}

fn missing_keywords_tip(missing: &[String], max_listed: usize) -> String {
    let listed: Vec<&str> = missing
        .iter()
        .take(max_listed.max(1))
        .map(String::as_str)
        .collect();
    let remaining = missing.len() - listed.len();

    if remaining == 0 {
        format!("Add these missing keywords: {}", listed.join(", "))
    } else {
        format!(
            "Add these missing keywords: {} (and {remaining} more)",
            listed.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScorerConfig {
        ScorerConfig::default()
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_short_single_line_resume_gets_both_issues() {
        let issues = formatting_issues("Rust developer", &config());
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("too short"));
        assert!(issues[1].contains("section separation"));
    }

    #[test]
    fn test_long_well_separated_resume_has_no_issues() {
        let resume = "Experienced backend engineer with a focus on reliable services.\n".repeat(12);
        assert!(formatting_issues(&resume, &config()).is_empty());
    }

    #[test]
    fn test_long_single_paragraph_only_flags_separation() {
        let resume = "word ".repeat(100);
        let issues = formatting_issues(&resume, &config());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("section separation"));
    }

    #[test]
    fn test_trailing_newline_counts_as_a_line() {
        // nine newlines → ten lines, the last one empty
        let resume = "a line of text that is long enough to count\n".repeat(9);
        let issues = formatting_issues(&resume, &config());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let config = ScorerConfig {
            min_resume_len: 5,
            min_resume_lines: 1,
            ..ScorerConfig::default()
        };
        assert!(formatting_issues("Rust developer", &config).is_empty());
    }

    #[test]
    fn test_no_tips_for_perfect_result() {
        assert!(optimization_tips(100, &[], &[], &config()).is_empty());
    }

    #[test]
    fn test_missing_keywords_tip_lists_keywords() {
        let tips = optimization_tips(80, &keywords(&["kafka", "redis"]), &[], &config());
        assert_eq!(tips, vec!["Add these missing keywords: kafka, redis"]);
    }

    #[test]
    fn test_missing_keywords_tip_truncates_long_lists() {
        let missing = keywords(&["one1", "two2", "three", "four", "five", "six6", "seven"]);
        let tips = optimization_tips(90, &missing, &[], &config());
        assert_eq!(
            tips[0],
            "Add these missing keywords: one1, two2, three, four, five (and 2 more)"
        );
    }

    #[test]
    fn test_low_score_adds_skills_tip() {
        let tips = optimization_tips(69, &keywords(&["kafka"]), &[], &config());
        assert_eq!(tips.len(), 2);
        assert!(tips[1].contains("relevant skills"));
    }

    #[test]
    fn test_score_at_target_has_no_skills_tip() {
        let tips = optimization_tips(70, &keywords(&["kafka"]), &[], &config());
        assert_eq!(tips.len(), 1);
    }

    #[test]
    fn test_formatting_issues_add_structure_tip() {
        let tips = optimization_tips(100, &[], &["too short".to_string()], &config());
        assert_eq!(tips.len(), 1);
        assert!(tips[0].contains("section headings"));
        assert!(tips[0].contains("Experience"));
    }
}
