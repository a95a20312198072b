use chrono::{DateTime, FixedOffset};
use fake::{
    faker::{address::en::CityName, name::en::FirstName, name::en::LastName},
    Dummy, Fake, Faker,
};
use sqlx::{types::Json, PgConnection, PgPool, Postgres};

use crate::model::advocate::{Advocate, TABLE_NAME};

pub const DEGREES: [&str; 3] = ["MD", "PhD", "MSW"];

pub const SPECIALTIES: [&str; 26] = [
    "Bipolar",
    "LGBTQ",
    "Medication/Prescribing",
    "Suicide History/Attempts",
    "General Mental Health (anxiety, depression, stress, grief, life transitions)",
    "Men's issues",
    "Relationship Issues (family, friends, couple, etc)",
    "Trauma & PTSD",
    "Personality disorders",
    "Personal growth",
    "Substance use/abuse",
    "Pediatrics",
    "Women's issues (post-partum, infertility, family planning)",
    "Chronic pain",
    "Weight loss & nutrition",
    "Eating disorders",
    "Diabetic Diet and nutrition",
    "Coaching (leadership, career, academic and wellness)",
    "Life coaching",
    "Obsessive-compulsive disorders",
    "Neuropsychological evaluations & testing (ADHD testing)",
    "Attention and Hyperactivity (ADHD)",
    "Sleep issues",
    "Schizophrenia and psychotic disorders",
    "Learning disorders",
    "Domestic abuse",
];

pub struct AdvocateFactory<T: Clone> {
    modifier_one: fn(x: &Advocate, ext: T) -> Advocate,
    modifier_many: fn(x: &Advocate, idx: usize, ext: T) -> Advocate,
}

impl<T: Clone> Default for AdvocateFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> AdvocateFactory<T> {
    pub fn new() -> Self {
        Self {
            modifier_one: |x, _| x.clone(),
            modifier_many: |x, _, _| x.clone(),
        }
    }

    pub fn modified_one(&mut self, modifier: fn(x: &Advocate, ext: T) -> Advocate) {
        self.modifier_one = modifier
    }

    pub fn modified_many(&mut self, modifier: fn(x: &Advocate, idx: usize, ext: T) -> Advocate) {
        self.modifier_many = modifier
    }

    /// The generated `id` is ignored, the returned row carries the one the store assigned.
    pub async fn generate_one(&mut self, db: &PgPool, ext: T) -> anyhow::Result<Advocate> {
        let data = AdvocateDummy::new();
        let data = data.generate_one();
        let data = (self.modifier_one)(&data, ext);
        let mut conn = db.acquire().await?;
        let inserted = insert(&mut *conn, &data).await?;
        Ok(inserted)
    }

    pub async fn generate_many(
        &mut self,
        db: &PgPool,
        num: u32,
        ext: T,
    ) -> anyhow::Result<Vec<Advocate>> {
        let data = AdvocateDummy::new();
        let data = data.generate_many(num);
        let mut result: Vec<Advocate> = vec![];
        for (idx, item) in data.iter().enumerate() {
            result.push((self.modifier_many)(item, idx, ext.clone()));
        }
        let mut tx = db.begin().await?;
        let mut inserted: Vec<Advocate> = vec![];
        for item in result {
            inserted.push(insert(&mut *tx, &item).await?);
        }
        tx.commit().await?;
        Ok(inserted)
    }
}

async fn insert(conn: &mut PgConnection, data: &Advocate) -> anyhow::Result<Advocate> {
    let stmt = format!(
        r#"
    INSERT INTO {} (first_name, last_name, city, degree, specialties,
    years_of_experience, phone_number, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, CURRENT_TIMESTAMP))
    RETURNING *"#,
        TABLE_NAME
    );
    let row: Advocate = sqlx::query_as::<Postgres, Advocate>(&stmt)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.city)
        .bind(&data.degree)
        .bind(&data.specialties)
        .bind(data.years_of_experience)
        .bind(data.phone_number)
        .bind(data.created_at)
        .fetch_one(conn)
        .await?;
    Ok(row)
}

#[derive(Debug, Dummy, Clone)]
struct AdvocateDummy {
    #[dummy(faker = "FirstName()")]
    pub first_name: String,
    #[dummy(faker = "LastName()")]
    pub last_name: String,
    #[dummy(faker = "CityName()")]
    pub city: String,
    #[dummy(faker = "0..3")]
    pub degree_idx: usize,
    #[dummy(faker = "(0..26, 1..4)")]
    pub specialty_idx: Vec<usize>,
    #[dummy(faker = "1..35")]
    pub years_of_experience: i32,
    #[dummy(faker = "2_000_000_000i64..9_999_999_999i64")]
    pub phone_number: i64,
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl AdvocateDummy {
    pub fn new() -> Self {
        Faker.fake::<Self>()
    }

    fn into_advocate(self) -> Advocate {
        let mut specialties: Vec<String> = vec![];
        for idx in self.specialty_idx {
            let specialty = SPECIALTIES[idx % SPECIALTIES.len()].to_string();
            if !specialties.contains(&specialty) {
                specialties.push(specialty);
            }
        }
        Advocate {
            id: 0,
            first_name: self.first_name,
            last_name: self.last_name,
            city: self.city,
            degree: DEGREES[self.degree_idx % DEGREES.len()].to_string(),
            specialties: Json(specialties),
            years_of_experience: self.years_of_experience,
            phone_number: self.phone_number,
            created_at: self.created_at,
        }
    }

    pub fn generate_one(&self) -> Advocate {
        Faker.fake::<AdvocateDummy>().into_advocate()
    }

    pub fn generate_many(&self, num: u32) -> Vec<Advocate> {
        let mut result: Vec<Advocate> = vec![];
        for _ in 0..num {
            result.push(Faker.fake::<Self>().into_advocate());
        }
        result
    }
}
