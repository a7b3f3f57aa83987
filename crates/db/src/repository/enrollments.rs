//! Enrollment repository functions.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    DbError,
    models::{AddressRow, EnrollmentParams, EnrollmentRow, EnrollmentWithAddresses},
};

/// Fetch the enrollment owned by `user_id`, if any.
pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<EnrollmentRow>, DbError> {
    let row = sqlx::query_as::<_, EnrollmentRow>(
        r#"
        SELECT id, user_id, name, cpf, birthday, phone, created_at, updated_at
        FROM enrollments
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Fetch the enrollment owned by `user_id` together with its addresses
/// (oldest first).
///
/// Returns `None` when the user has no enrollment.
pub async fn find_with_address_by_user_id(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<EnrollmentWithAddresses>, DbError> {
    let Some(enrollment) = find_by_user_id(pool, user_id).await? else {
        return Ok(None);
    };

    let addresses = sqlx::query_as::<_, AddressRow>(
        r#"
        SELECT id, enrollment_id, cep, street, city, state, number, neighborhood,
               address_detail, created_at, updated_at
        FROM addresses
        WHERE enrollment_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(enrollment.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(EnrollmentWithAddresses { enrollment, addresses }))
}

/// Insert the enrollment for `user_id`, or overwrite its columns if one
/// already exists.
///
/// The conflict target is the unique `user_id` column, so a user never owns
/// more than one row.  `id` and `created_at` are preserved on update.
pub async fn upsert(
    pool: &PgPool,
    user_id: Uuid,
    params: &EnrollmentParams,
) -> Result<EnrollmentRow, DbError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, EnrollmentRow>(
        r#"
        INSERT INTO enrollments (id, user_id, name, cpf, birthday, phone, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        ON CONFLICT (user_id) DO UPDATE
        SET name = EXCLUDED.name,
            cpf = EXCLUDED.cpf,
            birthday = EXCLUDED.birthday,
            phone = EXCLUDED.phone,
            updated_at = EXCLUDED.updated_at
        RETURNING id, user_id, name, cpf, birthday, phone, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&params.name)
    .bind(&params.cpf)
    .bind(params.birthday)
    .bind(&params.phone)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
