//! Single-level transactional execution scope.
//!
//! [`execute`] opens one transaction, hands it to the callback, and
//! commits if the callback returns `Ok` or rolls back (propagating the
//! error) otherwise. Used wherever an operation must atomically touch
//! more than one table: tag update/delete cascading to events,
//! invitation acceptance creating a membership, household creation
//! seeding its first admin.
//!
//! Nested unit-of-work calls are not supported; repositories expose
//! `_in_tx` method variants for use inside the callback.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

/// Run `callback` inside a single transaction.
///
/// The callback receives the live transaction and must route every
/// statement through it. Any `Err` return rolls the transaction back
/// before the error is propagated; a rollback failure is logged and
/// the original error still wins.
///
/// ```ignore
/// let updated = unit_of_work::execute(&pool, |tx| {
///     Box::pin(async move {
///         let tag = TagRepo::update_in_tx(tx, tag_id, None, Some("eco")).await?;
///         EventRepo::delete_by_tag_in_tx(tx, household_id, "washer", "long").await?;
///         Ok::<_, sqlx::Error>(tag)
///     })
/// })
/// .await?;
/// ```
pub async fn execute<T, E, F>(pool: &PgPool, callback: F) -> Result<T, E>
where
    E: From<sqlx::Error>,
    F: for<'t> FnOnce(&'t mut Transaction<'static, Postgres>) -> BoxFuture<'t, Result<T, E>>,
{
    let mut tx = pool.begin().await.map_err(E::from)?;
    match callback(&mut tx).await {
        Ok(value) => {
            tx.commit().await.map_err(E::from)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
