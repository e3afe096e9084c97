use anyhow::Result;
use async_trait::async_trait;
use diesel::{
    PgConnection, RunQueryDsl, delete, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    sql_query,
    sql_types::BigInt,
    update,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{pagarme_gateways, payment_gateways},
    },
};
use domain::{
    entities::payment_gateways::{
        EditGatewayExtensionEntity, EditPaymentGatewayEntity, InsertGatewayExtensionEntity,
        InsertPaymentGatewayEntity, PagarmeGatewayEntity, PaymentGatewayEntity,
        PaymentGatewayRecord,
    },
    repositories::payment_gateways::PaymentGatewayRepository,
    value_objects::payment_gateways::{DefaultGatewayConflict, SINGLE_DEFAULT_INDEX},
};

/// Transaction-scoped advisory lock serializing every change of the default gateway.
const DEFAULT_GATEWAY_LOCK_KEY: i64 = 0x7061_7967_7477_0001;

pub struct PaymentGatewayPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentGatewayPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

type GatewayRow = (PaymentGatewayEntity, Option<PagarmeGatewayEntity>);

fn into_record((gateway, pagarme): GatewayRow) -> PaymentGatewayRecord {
    PaymentGatewayRecord { gateway, pagarme }
}

fn lock_default_flag(conn: &mut PgConnection) -> QueryResult<usize> {
    sql_query("SELECT pg_advisory_xact_lock($1)")
        .bind::<BigInt, _>(DEFAULT_GATEWAY_LOCK_KEY)
        .execute(conn)
}

/// Keeps a single default gateway: unsets the flag everywhere except `keep`.
/// Callers hold the default-flag lock.
fn clear_other_defaults(conn: &mut PgConnection, keep: Option<Uuid>) -> QueryResult<usize> {
    let others = payment_gateways::table.filter(payment_gateways::is_default.eq(true));

    match keep {
        Some(gateway_id) => update(others.filter(payment_gateways::id.ne(gateway_id)))
            .set(payment_gateways::is_default.eq(false))
            .execute(conn),
        None => update(others)
            .set(payment_gateways::is_default.eq(false))
            .execute(conn),
    }
}

fn default_conflict(err: DieselError, gateway_id: Uuid) -> anyhow::Error {
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
        if info.constraint_name() == Some(SINGLE_DEFAULT_INDEX) {
            return DefaultGatewayConflict { gateway_id }.into();
        }
    }
    err.into()
}

fn find_record(conn: &mut PgConnection, gateway_id: Uuid) -> QueryResult<Option<GatewayRow>> {
    payment_gateways::table
        .left_join(pagarme_gateways::table)
        .filter(payment_gateways::id.eq(gateway_id))
        .select((
            PaymentGatewayEntity::as_select(),
            Option::<PagarmeGatewayEntity>::as_select(),
        ))
        .first::<GatewayRow>(conn)
        .optional()
}

#[async_trait]
impl PaymentGatewayRepository for PaymentGatewayPostgres {
    async fn create(
        &self,
        gateway: InsertPaymentGatewayEntity,
        extension: InsertGatewayExtensionEntity,
    ) -> Result<PaymentGatewayRecord> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let record = conn.transaction::<_, anyhow::Error, _>(|conn| {
            if gateway.is_default {
                lock_default_flag(conn)?;
                clear_other_defaults(conn, None)?;
            }

            let base = insert_into(payment_gateways::table)
                .values(&gateway)
                .returning(PaymentGatewayEntity::as_returning())
                .get_result::<PaymentGatewayEntity>(conn)
                .map_err(|err| default_conflict(err, gateway.id))?;

            let pagarme = match &extension {
                InsertGatewayExtensionEntity::Pagarme(row) => Some(
                    insert_into(pagarme_gateways::table)
                        .values(row)
                        .returning(PagarmeGatewayEntity::as_returning())
                        .get_result::<PagarmeGatewayEntity>(conn)?,
                ),
            };

            Ok(PaymentGatewayRecord {
                gateway: base,
                pagarme,
            })
        })?;

        Ok(record)
    }

    async fn find_by_id(&self, gateway_id: Uuid) -> Result<Option<PaymentGatewayRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = find_record(&mut conn, gateway_id)?;

        Ok(row.map(into_record))
    }

    async fn find_default(&self) -> Result<Option<PaymentGatewayRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = payment_gateways::table
            .left_join(pagarme_gateways::table)
            .filter(payment_gateways::is_default.eq(true))
            .order(payment_gateways::updated_at.desc())
            .select((
                PaymentGatewayEntity::as_select(),
                Option::<PagarmeGatewayEntity>::as_select(),
            ))
            .first::<GatewayRow>(&mut conn)
            .optional()?;

        Ok(row.map(into_record))
    }

    async fn list(&self) -> Result<Vec<PaymentGatewayRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = payment_gateways::table
            .left_join(pagarme_gateways::table)
            .order(payment_gateways::created_at.asc())
            .select((
                PaymentGatewayEntity::as_select(),
                Option::<PagarmeGatewayEntity>::as_select(),
            ))
            .load::<GatewayRow>(&mut conn)?;

        Ok(rows.into_iter().map(into_record).collect())
    }

    async fn update(
        &self,
        gateway_id: Uuid,
        gateway: EditPaymentGatewayEntity,
        extension: Option<EditGatewayExtensionEntity>,
    ) -> Result<Option<PaymentGatewayRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let record = conn.transaction::<_, anyhow::Error, _>(|conn| {
            let exists = payment_gateways::table
                .find(gateway_id)
                .select(payment_gateways::id)
                .for_update()
                .first::<Uuid>(conn)
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }

            if gateway.is_default {
                lock_default_flag(conn)?;
                clear_other_defaults(conn, Some(gateway_id))?;
            }

            let updated = update(payment_gateways::table.find(gateway_id))
                .set(&gateway)
                .execute(conn)
                .map_err(|err| default_conflict(err, gateway_id))?;
            if updated == 0 {
                return Ok(None);
            }

            match &extension {
                Some(EditGatewayExtensionEntity::Pagarme(row)) => {
                    update(pagarme_gateways::table.find(gateway_id))
                        .set(row)
                        .execute(conn)?;
                }
                None => {}
            }

            Ok(find_record(conn, gateway_id)?.map(into_record))
        })?;

        Ok(record)
    }

    async fn delete(&self, gateway_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = conn.transaction::<_, anyhow::Error, _>(|conn| {
            delete(pagarme_gateways::table.find(gateway_id)).execute(conn)?;
            let deleted = delete(payment_gateways::table.find(gateway_id)).execute(conn)?;
            Ok(deleted > 0)
        })?;

        Ok(deleted)
    }
}
