use sqlx::{Postgres, Transaction};

use crate::{
    core::{
        pagination::PageParams,
        sqlx_utils::{any_of, binds_query_as, like_pattern, query_builder, SqlxBinds},
    },
    model::advocate::{Advocate, TABLE_NAME},
};

const SEARCH_COLUMNS: [&str; 6] = [
    "first_name",
    "last_name",
    "city",
    "degree",
    "specialties::text",
    "years_of_experience::text",
];

/// Returns the requested page and the number of rows matching the filter.
pub async fn paginate_advocate(
    tx: &mut Transaction<'_, Postgres>,
    params: &PageParams,
) -> anyhow::Result<(Vec<Advocate>, u64)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];
    let order_by: Vec<String>;

    if let Some(search) = &params.search {
        binds.push(SqlxBinds::String(like_pattern(search)));
        let predicates: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|column| format!("{} ILIKE ${}", column, binds.len()))
            .collect();
        filters.push(any_of(&predicates));
        order_by = vec![
            "last_name ASC".to_string(),
            "first_name ASC".to_string(),
            "id ASC".to_string(),
        ];
    } else {
        order_by = vec!["id ASC".to_string()];
    }

    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        order_by,
        Some(params.limit),
        Some(params.offset()),
    );
    let stmt_count = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );

    let q_count = binds_query_as::<(i64,)>(&stmt_count, binds.clone());
    let q = binds_query_as::<Advocate>(&stmt, binds);
    let count = q_count.fetch_one(&mut **tx).await?;
    let data = q.fetch_all(&mut **tx).await?;
    Ok((data, count.0 as u64))
}
