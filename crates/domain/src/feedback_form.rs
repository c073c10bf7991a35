//! Feedback form validation shared by document and section feedback.

use crate::entities::feedback::{FileFeedback, SectionFeedback};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{DocLevel, Rating};

pub const MAX_FEEDBACK_LENGTH: usize = 500;

/// Unvalidated form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub rating: Option<u8>,
    pub text: String,
}

impl FeedbackDraft {
    pub fn new(rating: Option<u8>, text: &str) -> Self {
        Self {
            rating,
            text: text.to_string(),
        }
    }

    fn checked_rating(&self) -> DomainResult<Rating> {
        let value = self
            .rating
            .ok_or_else(|| DomainError::MissingField("rating".to_string()))?;
        Rating::new(value)
    }

    fn checked_text(&self) -> DomainResult<&str> {
        let text = self.text.trim();
        let length = text.chars().count();
        if length > MAX_FEEDBACK_LENGTH {
            return Err(DomainError::FeedbackTooLong {
                length,
                max: MAX_FEEDBACK_LENGTH,
            });
        }
        Ok(text)
    }

    /// Document-level feedback. The evaluation form requires a comment,
    /// the inline file rating does not.
    pub fn into_file_feedback(
        &self,
        user_id: &str,
        path: &str,
        level: DocLevel,
        require_text: bool,
    ) -> DomainResult<FileFeedback> {
        let rating = self.checked_rating()?;
        let text = self.checked_text()?;
        if require_text && text.is_empty() {
            return Err(DomainError::MissingField("feedback".to_string()));
        }
        if path.trim().is_empty() {
            return Err(DomainError::MissingField("path".to_string()));
        }
        Ok(FileFeedback {
            user_id: user_id.to_string(),
            path: path.to_string(),
            level,
            rating,
            feedback: text.to_string(),
        })
    }

    pub fn into_section_feedback(
        &self,
        user_id: &str,
        documentation_id: i64,
        section_id: i64,
    ) -> DomainResult<SectionFeedback> {
        let rating = self.checked_rating()?;
        let text = self.checked_text()?;
        Ok(SectionFeedback {
            user_id: user_id.to_string(),
            documentation_id,
            section_id,
            rating,
            feedback: (!text.is_empty()).then(|| text.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_required() {
        let draft = FeedbackDraft::new(None, "nice");
        assert_eq!(
            draft.into_file_feedback("1", "src/a.py", DocLevel::File, false),
            Err(DomainError::MissingField("rating".to_string()))
        );
    }

    #[test]
    fn test_rating_range() {
        let draft = FeedbackDraft::new(Some(6), "nice");
        assert_eq!(
            draft.into_section_feedback("1", 2, 3),
            Err(DomainError::InvalidRating(6))
        );
    }

    #[test]
    fn test_text_length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_FEEDBACK_LENGTH);
        assert!(FeedbackDraft::new(Some(4), &at_limit)
            .into_section_feedback("1", 2, 3)
            .is_ok());

        let over = "x".repeat(MAX_FEEDBACK_LENGTH + 1);
        assert_eq!(
            FeedbackDraft::new(Some(4), &over).into_section_feedback("1", 2, 3),
            Err(DomainError::FeedbackTooLong {
                length: MAX_FEEDBACK_LENGTH + 1,
                max: MAX_FEEDBACK_LENGTH
            })
        );
    }

    #[test]
    fn test_required_comment() {
        let draft = FeedbackDraft::new(Some(5), "   ");
        assert_eq!(
            draft.into_file_feedback("1", "src/a.py", DocLevel::File, true),
            Err(DomainError::MissingField("feedback".to_string()))
        );
        let ok = draft
            .into_file_feedback("1", "src/a.py", DocLevel::File, false)
            .expect("comment optional");
        assert_eq!(ok.feedback, "");
    }

    #[test]
    fn test_section_feedback_blank_comment_is_none() {
        let feedback = FeedbackDraft::new(Some(2), " ")
            .into_section_feedback("1", 2, 3)
            .expect("valid");
        assert_eq!(feedback.feedback, None);
        assert_eq!(feedback.rating.value(), 2);
    }
}
