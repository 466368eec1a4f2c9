use anyhow::Context;
use sqlx::PgPool;

use crate::addresses::repo_types::{Address, AddressFields};

const COLUMNS: &str = "id, street, city, province, country, postal_code, contact_id";

impl Address {
    pub async fn create(db: &PgPool, contact_id: i64, f: AddressFields<'_>) -> anyhow::Result<Address> {
        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            INSERT INTO addresses (street, city, province, country, postal_code, contact_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(f.street)
        .bind(f.city)
        .bind(f.province)
        .bind(f.country)
        .bind(f.postal_code)
        .bind(contact_id)
        .fetch_one(db)
        .await
        .context("insert address")?;
        Ok(address)
    }

    pub async fn list_by_contact(db: &PgPool, contact_id: i64) -> anyhow::Result<Vec<Address>> {
        let rows = sqlx::query_as::<_, Address>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM addresses
            WHERE contact_id = $1
            ORDER BY id
            "#
        ))
        .bind(contact_id)
        .fetch_all(db)
        .await
        .context("list addresses by contact")?;
        Ok(rows)
    }

    pub async fn find_in_contact(
        db: &PgPool,
        contact_id: i64,
        id: i64,
    ) -> anyhow::Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM addresses
            WHERE contact_id = $1 AND id = $2
            "#
        ))
        .bind(contact_id)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find address")?;
        Ok(address)
    }

    /// Absent optional fields keep their stored value.
    pub async fn update(
        db: &PgPool,
        contact_id: i64,
        id: i64,
        f: AddressFields<'_>,
    ) -> anyhow::Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            UPDATE addresses
               SET street = $3,
                   city = COALESCE($4, city),
                   province = COALESCE($5, province),
                   country = $6,
                   postal_code = $7
             WHERE contact_id = $1 AND id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(contact_id)
        .bind(id)
        .bind(f.street)
        .bind(f.city)
        .bind(f.province)
        .bind(f.country)
        .bind(f.postal_code)
        .fetch_optional(db)
        .await
        .context("update address")?;
        Ok(address)
    }

    pub async fn delete(db: &PgPool, contact_id: i64, id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM addresses WHERE contact_id = $1 AND id = $2")
            .bind(contact_id)
            .bind(id)
            .execute(db)
            .await
            .context("delete address")?;
        Ok(res.rows_affected())
    }
}
