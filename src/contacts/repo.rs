use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::contacts::repo_types::{Contact, ContactFilter};

const COLUMNS: &str = "id, first_name, last_name, email, phone, username";

impl Contact {
    pub async fn create(
        db: &PgPool,
        username: &str,
        first_name: &str,
        last_name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> anyhow::Result<Contact> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, username)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(username)
        .fetch_one(db)
        .await
        .context("insert contact")?;
        Ok(contact)
    }

    /// Only finds contacts owned by `username`.
    pub async fn find_owned(db: &PgPool, username: &str, id: i64) -> anyhow::Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM contacts
            WHERE id = $1 AND username = $2
            "#
        ))
        .bind(id)
        .bind(username)
        .fetch_optional(db)
        .await
        .context("find contact")?;
        Ok(contact)
    }

    /// Absent optional fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        username: &str,
        id: i64,
        first_name: &str,
        last_name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> anyhow::Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(&format!(
            r#"
            UPDATE contacts
               SET first_name = $3,
                   last_name = COALESCE($4, last_name),
                   email = COALESCE($5, email),
                   phone = COALESCE($6, phone)
             WHERE id = $1 AND username = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .fetch_optional(db)
        .await
        .context("update contact")?;
        Ok(contact)
    }

    /// Addresses go with the contact (`ON DELETE CASCADE`).
    pub async fn delete(db: &PgPool, username: &str, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM contacts WHERE id = $1 AND username = $2")
            .bind(id)
            .bind(username)
            .execute(db)
            .await
            .context("delete contact")?;
        Ok(res.rows_affected())
    }

    pub async fn search(
        db: &PgPool,
        username: &str,
        filter: &ContactFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<(Vec<Contact>, i64)> {
        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM contacts"));
        push_search_filters(&mut select, username, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM contacts");
        push_search_filters(&mut count, username, filter);

        let (rows, (total,)) = tokio::try_join!(
            select.build_query_as::<Contact>().fetch_all(db),
            count.build_query_as::<(i64,)>().fetch_one(db),
        )
        .context("search contacts")?;
        Ok((rows, total))
    }
}

/// Appends the `WHERE` clause shared by the page query and the count query.
pub(crate) fn push_search_filters<'a>(
    qb: &mut QueryBuilder<'a, Postgres>,
    username: &'a str,
    filter: &ContactFilter<'_>,
) {
    qb.push(" WHERE username = ").push_bind(username);
    if let Some(name) = filter.name {
        let pattern = like_pattern(name);
        qb.push(" AND (first_name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name LIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(phone) = filter.phone {
        qb.push(" AND phone LIKE ").push_bind(like_pattern(phone));
    }
    if let Some(email) = filter.email {
        qb.push(" AND email LIKE ").push_bind(like_pattern(email));
    }
}

/// `%needle%` with LIKE metacharacters escaped so input matches literally.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
