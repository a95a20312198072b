use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::{types::Json, FromRow};

pub const TABLE_NAME: &str = "public.advocates";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Advocate {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub degree: String,
    pub specialties: Json<Vec<String>>,
    pub years_of_experience: i32,
    pub phone_number: i64,
    pub created_at: Option<DateTime<FixedOffset>>,
}
