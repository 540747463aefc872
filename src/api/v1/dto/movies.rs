/*
 * Responsibility
 * - Movies の request/response DTO
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub title: String,
    pub release_date: NaiveDate,
}

impl CreateMovieRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl UpdateMovieRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct MovieShort {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

/// Detail view includes the cast's names.
#[derive(Debug, Serialize)]
pub struct MovieDetail {
    pub title: String,
    pub release_date: NaiveDate,
    pub cast: Vec<String>,
}
