use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::{core::utils::datetime_to_string_opt, model::advocate::Advocate};

use super::common::{InternalServerErrorResponse, PaginationInfo};

#[derive(Object, Deserialize, Serialize, Debug, Clone, PartialEq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AdvocateDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Vec<String>,
    pub years_of_experience: i32,
    pub phone_number: i64,
    pub created_at: Option<String>,
}

impl AdvocateDetail {
    /// Case-insensitive substring match over the searchable fields.
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.first_name.to_lowercase().contains(&term)
            || self.last_name.to_lowercase().contains(&term)
            || self.city.to_lowercase().contains(&term)
            || self.degree.to_lowercase().contains(&term)
            || self
                .specialties
                .iter()
                .any(|specialty| specialty.to_lowercase().contains(&term))
            || self.years_of_experience.to_string().contains(&term)
    }
}

impl From<Advocate> for AdvocateDetail {
    fn from(item: Advocate) -> Self {
        Self {
            id: item.id,
            first_name: item.first_name,
            last_name: item.last_name,
            city: item.city,
            degree: item.degree,
            specialties: item.specialties.0,
            years_of_experience: item.years_of_experience,
            phone_number: item.phone_number,
            created_at: datetime_to_string_opt(item.created_at),
        }
    }
}

#[derive(Object, Deserialize, Serialize, Debug, Clone)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PaginateAdvocateResponse {
    pub data: Vec<AdvocateDetail>,
    pub pagination: PaginationInfo,
    pub search_term: Option<String>,
}

#[derive(ApiResponse)]
pub enum PaginateAdvocateResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateAdvocateResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
