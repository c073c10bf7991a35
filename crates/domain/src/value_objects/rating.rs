//! Rating - star rating attached to feedback

use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// A 1..=5 star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create new rating with range validation
    pub fn new(value: u8) -> DomainResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::InvalidRating(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Star bar as rendered in the feedback form, e.g. `★★★☆☆`
    pub fn stars(&self) -> String {
        (Self::MIN..=Self::MAX)
            .map(|i| if i <= self.0 { '★' } else { '☆' })
            .collect()
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).map(|r| r.value()), Ok(1));
        assert_eq!(Rating::new(5).map(|r| r.value()), Ok(5));
    }

    #[test]
    fn test_rating_stars() {
        let rating = Rating::new(3).expect("valid rating");
        assert_eq!(rating.stars(), "★★★☆☆");
    }

    #[test]
    fn test_rating_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }
}
