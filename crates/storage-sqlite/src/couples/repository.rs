use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use piggybank_core::couples::{
    Couple, CoupleError, CoupleRepositoryTrait, CoupleRequest, CoupleStatus, NewCoupleRequest,
};
use piggybank_core::{Error, Result};

use super::model::{CoupleDB, CoupleMemberDB, CoupleRequestDB, NewCoupleRequestDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{is_unique_violation, IntoCore, StorageError};
use crate::schema::{couple_members, couple_requests, couples};

const PENDING: &str = "pending";

pub struct CoupleRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CoupleRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CoupleRepository { pool, writer }
    }

    fn load_requests(rows: Vec<CoupleRequestDB>) -> Result<Vec<CoupleRequest>> {
        rows.into_iter().map(CoupleRequest::try_from).collect()
    }
}

/// Fails when any of the users already belongs to a couple or takes part in
/// a pending request. Runs inside the writer transaction, so it sees every
/// committed write.
fn ensure_parties_free(conn: &mut SqliteConnection, parties: &[String]) -> Result<()> {
    let coupled: i64 = couple_members::table
        .filter(couple_members::user_id.eq_any(parties.to_vec()))
        .count()
        .get_result(conn)
        .into_core()?;
    if coupled > 0 {
        return Err(CoupleError::AlreadyCoupled.into());
    }

    let pending: i64 = couple_requests::table
        .filter(couple_requests::status.eq(PENDING))
        .filter(
            couple_requests::requester_user_id
                .eq_any(parties.to_vec())
                .or(couple_requests::target_user_id.eq_any(parties.to_vec())),
        )
        .count()
        .get_result(conn)
        .into_core()?;
    if pending > 0 {
        return Err(CoupleError::PendingRequestExists.into());
    }

    Ok(())
}

#[async_trait]
impl CoupleRepositoryTrait for CoupleRepository {
    async fn create_request(&self, new_request: NewCoupleRequest) -> Result<CoupleRequest> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CoupleRequest> {
                let mut parties = vec![new_request.requester_user_id.clone()];
                if let Some(target_id) = new_request.target.user_id() {
                    parties.push(target_id.to_string());
                }
                ensure_parties_free(conn, &parties)?;

                let row = NewCoupleRequestDB {
                    id: Uuid::new_v4().to_string(),
                    requester_user_id: new_request.requester_user_id,
                    target_user_id: new_request.target.user_id().map(str::to_string),
                    target_email: new_request.target.email().map(str::to_string),
                    status: CoupleStatus::Pending.as_str().to_string(),
                    invitation_token: new_request.invitation_token,
                    created_at: Utc::now().naive_utc(),
                };

                let created = diesel::insert_into(couple_requests::table)
                    .values(&row)
                    .returning(CoupleRequestDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            Error::from(CoupleError::PendingRequestExists)
                        } else {
                            StorageError::from(e).into()
                        }
                    })?;
                CoupleRequest::try_from(created)
            })
            .await
    }

    fn get_request(&self, request_id: &str) -> Result<Option<CoupleRequest>> {
        let mut conn = get_connection(&self.pool)?;
        couple_requests::table
            .find(request_id)
            .select(CoupleRequestDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(CoupleRequest::try_from)
            .transpose()
    }

    fn get_request_by_invitation_token(&self, token: &str) -> Result<Option<CoupleRequest>> {
        let mut conn = get_connection(&self.pool)?;
        couple_requests::table
            .filter(couple_requests::invitation_token.eq(token))
            .select(CoupleRequestDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(CoupleRequest::try_from)
            .transpose()
    }

    fn find_pending_request_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<CoupleRequest>> {
        let mut conn = get_connection(&self.pool)?;
        couple_requests::table
            .filter(couple_requests::status.eq(PENDING))
            .filter(
                couple_requests::requester_user_id
                    .eq(user_a)
                    .and(couple_requests::target_user_id.eq(user_b))
                    .or(couple_requests::requester_user_id
                        .eq(user_b)
                        .and(couple_requests::target_user_id.eq(user_a))),
            )
            .select(CoupleRequestDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?
            .map(CoupleRequest::try_from)
            .transpose()
    }

    fn list_pending_requests_for_user(&self, user_id: &str) -> Result<Vec<CoupleRequest>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = couple_requests::table
            .filter(couple_requests::status.eq(PENDING))
            .filter(
                couple_requests::requester_user_id
                    .eq(user_id)
                    .or(couple_requests::target_user_id.eq(user_id)),
            )
            .order(couple_requests::created_at.asc())
            .select(CoupleRequestDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Self::load_requests(rows)
    }

    fn get_couple_by_user(&self, user_id: &str) -> Result<Option<Couple>> {
        let mut conn = get_connection(&self.pool)?;
        let couple = couples::table
            .inner_join(couple_members::table)
            .filter(couple_members::user_id.eq(user_id))
            .select(CoupleDB::as_select())
            .first(&mut conn)
            .optional()
            .into_core()?;
        Ok(couple.map(Couple::from))
    }

    async fn accept_request(
        &self,
        request_id: &str,
        requester_user_id: &str,
        accepter_user_id: &str,
    ) -> Result<Couple> {
        let request_id = request_id.to_string();
        let partner1 = requester_user_id.to_string();
        let partner2 = accepter_user_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Couple> {
                let now = Utc::now().naive_utc();

                let updated = diesel::update(
                    couple_requests::table
                        .filter(couple_requests::id.eq(&request_id))
                        .filter(couple_requests::status.eq(PENDING)),
                )
                .set((
                    couple_requests::status.eq(CoupleStatus::Accepted.as_str()),
                    couple_requests::responded_at.eq(Some(now)),
                ))
                .execute(conn)
                .into_core()?;
                if updated == 0 {
                    return Err(CoupleError::RequestNotPending.into());
                }

                let couple = diesel::insert_into(couples::table)
                    .values(&CoupleDB {
                        id: Uuid::new_v4().to_string(),
                        partner1_user_id: partner1.clone(),
                        partner2_user_id: partner2.clone(),
                        created_at: now,
                    })
                    .returning(CoupleDB::as_returning())
                    .get_result(conn)
                    .into_core()?;

                let members = [partner1, partner2].map(|user_id| CoupleMemberDB {
                    user_id,
                    couple_id: couple.id.clone(),
                });
                diesel::insert_into(couple_members::table)
                    .values(&members[..])
                    .execute(conn)
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            Error::from(CoupleError::AlreadyCoupled)
                        } else {
                            StorageError::from(e).into()
                        }
                    })?;

                debug!("Request {} accepted as couple {}", request_id, couple.id);
                Ok(Couple::from(couple))
            })
            .await
    }

    async fn bind_request_target(&self, request_id: &str, user_id: &str) -> Result<()> {
        let request_id = request_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let updated = diesel::update(
                    couple_requests::table
                        .filter(couple_requests::id.eq(&request_id))
                        .filter(couple_requests::target_user_id.is_null()),
                )
                .set((
                    couple_requests::target_user_id.eq(Some(user_id.clone())),
                    couple_requests::target_email.eq(None::<String>),
                ))
                .execute(conn)
                .into_core()?;

                if updated == 0 {
                    return Err(CoupleError::InvitationAlreadyClaimed.into());
                }
                Ok(())
            })
            .await
    }
}
