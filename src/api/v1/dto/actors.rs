/*
 * Responsibility
 * - Actors の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub name: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
}

impl CreateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.gender.trim().is_empty() {
            return Err("gender is required");
        }
        if self.gender.len() > 10 {
            return Err("gender must be <= 10 chars");
        }
        if self.name.len() > 512 {
            return Err("name must be <= 512 chars");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateActorRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl UpdateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && (name.trim().is_empty() || name.len() > 512)
        {
            return Err("name must be 1..=512 chars");
        }
        if let Some(gender) = &self.gender
            && (gender.trim().is_empty() || gender.len() > 10)
        {
            return Err("gender must be 1..=10 chars");
        }

        Ok(())
    }
}

/// List view: id and name only.
#[derive(Debug, Serialize)]
pub struct ActorShort {
    pub id: i32,
    pub name: String,
}

/// Detail view. `date_of_birth` is rendered as e.g. "September 28, 1989".
#[derive(Debug, Serialize)]
pub struct ActorDetail {
    pub name: String,
    pub gender: String,
    pub date_of_birth: String,
}

pub fn format_date_of_birth(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_nonempty_fields() {
        let req = CreateActorRequest {
            name: "  ".to_string(),
            gender: "Male".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1989, 9, 28).unwrap(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn dob_formatting_matches_detail_view() {
        let dob = NaiveDate::from_ymd_opt(1989, 9, 28).unwrap();
        assert_eq!(format_date_of_birth(dob), "September 28, 1989");
    }
}
