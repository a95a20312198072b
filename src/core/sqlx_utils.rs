use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    Postgres,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SqlxBinds {
    String(String),
}

pub fn binds_query_as<'a, T: for<'r> sqlx::FromRow<'r, PgRow>>(
    stmt: &'a str,
    binds: Vec<SqlxBinds>,
) -> QueryAs<'a, Postgres, T, PgArguments> {
    let mut q: QueryAs<'_, Postgres, T, PgArguments> = sqlx::query_as(stmt);
    for bind in binds.iter() {
        q = match bind {
            SqlxBinds::String(val) => q.bind(val.clone()),
        };
    }
    q
}

pub fn query_builder(
    select: Option<String>,
    table_name: &str,
    wheres: &[String],
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
) -> String {
    // Select
    let mut stmt = "SELECT".to_string();
    if let Some(val) = select {
        stmt.push_str(&format!(" {}", val));
    } else {
        stmt.push_str(" *");
    }

    // From
    stmt.push_str(format!(" FROM {}", table_name).as_str());

    // Where
    if !wheres.is_empty() {
        stmt.push_str(" WHERE");
        for (idx, item) in wheres.iter().enumerate() {
            stmt.push_str(&format!(" {}", item));
            if idx < wheres.len() - 1 {
                stmt.push_str(" AND");
            }
        }
    }

    // order by
    if !order_by.is_empty() {
        stmt.push_str(" ORDER BY");
        for (idx, item) in order_by.iter().enumerate() {
            stmt.push_str(format!(" {}", item).as_str());
            if idx < order_by.len() - 1 {
                stmt.push(',');
            }
        }
    }

    // Limit
    if let Some(limit) = limit {
        stmt.push_str(format!(" LIMIT {}", limit).as_str());
    }

    // Offset
    if let Some(offset) = offset {
        stmt.push_str(format!(" OFFSET {}", offset).as_str());
    }
    stmt
}

/// Join predicates into one parenthesized OR group usable as a single where item.
pub fn any_of(predicates: &[String]) -> String {
    format!("({})", predicates.join(" OR "))
}

/// Wrap a term in `%` for a substring `ILIKE`, escaping LIKE metacharacters
/// so the term matches literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
