//! Address repository functions.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    DbError,
    models::{AddressParams, AddressRow},
};

/// Insert the address for `enrollment_id`, or overwrite its columns if one
/// already exists.
///
/// Conflict target is the unique `enrollment_id` column.
pub async fn upsert(
    pool: &PgPool,
    enrollment_id: Uuid,
    params: &AddressParams,
) -> Result<AddressRow, DbError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, AddressRow>(
        r#"
        INSERT INTO addresses
            (id, enrollment_id, cep, street, city, state, number, neighborhood,
             address_detail, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        ON CONFLICT (enrollment_id) DO UPDATE
        SET cep = EXCLUDED.cep,
            street = EXCLUDED.street,
            city = EXCLUDED.city,
            state = EXCLUDED.state,
            number = EXCLUDED.number,
            neighborhood = EXCLUDED.neighborhood,
            address_detail = EXCLUDED.address_detail,
            updated_at = EXCLUDED.updated_at
        RETURNING id, enrollment_id, cep, street, city, state, number, neighborhood,
                  address_detail, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(enrollment_id)
    .bind(&params.cep)
    .bind(&params.street)
    .bind(&params.city)
    .bind(&params.state)
    .bind(&params.number)
    .bind(&params.neighborhood)
    .bind(&params.address_detail)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
