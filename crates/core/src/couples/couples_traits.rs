use async_trait::async_trait;

use crate::couples::couples_model::{
    Couple, CoupleRequest, CoupleStatusView, CoupleView, NewCoupleRequest, RegisterWithInvitation,
    RequestView,
};
use crate::errors::Result;
use crate::users::User;

/// Trait for couple repository operations
#[async_trait]
pub trait CoupleRepositoryTrait: Send + Sync {
    /// Inserts a pending request. Inside the write transaction the
    /// implementation re-checks that neither party is coupled and neither has
    /// a pending request, failing with `AlreadyCoupled` or
    /// `PendingRequestExists` otherwise.
    async fn create_request(&self, new_request: NewCoupleRequest) -> Result<CoupleRequest>;

    fn get_request(&self, request_id: &str) -> Result<Option<CoupleRequest>>;

    fn get_request_by_invitation_token(&self, token: &str) -> Result<Option<CoupleRequest>>;

    /// Pending request between two users, in either direction.
    fn find_pending_request_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Option<CoupleRequest>>;

    /// Pending requests where the user is requester or resolved target.
    fn list_pending_requests_for_user(&self, user_id: &str) -> Result<Vec<CoupleRequest>>;

    fn get_couple_by_user(&self, user_id: &str) -> Result<Option<Couple>>;

    /// Marks the request accepted if it is still pending and creates the
    /// couple in the same transaction. Fails with `RequestNotPending` when the
    /// conditional update matches no row.
    async fn accept_request(
        &self,
        request_id: &str,
        requester_user_id: &str,
        accepter_user_id: &str,
    ) -> Result<Couple>;

    /// Binds an email-targeted request to a registered user. Fails with
    /// `InvitationAlreadyClaimed` when the target was already bound.
    async fn bind_request_target(&self, request_id: &str, user_id: &str) -> Result<()>;
}

/// Trait for couple service operations
#[async_trait]
pub trait CoupleServiceTrait: Send + Sync {
    async fn request_couple(&self, requester_id: &str, partner_email: &str)
        -> Result<RequestView>;

    async fn accept_couple(&self, request_id: &str, current_user_id: &str) -> Result<CoupleView>;

    async fn resend_couple(&self, request_id: &str, current_user_id: &str) -> Result<()>;

    fn get_status(&self, user_id: &str) -> Result<CoupleStatusView>;

    async fn register_with_invitation(&self, input: RegisterWithInvitation) -> Result<User>;

    fn get_couple_for_user(&self, user_id: &str) -> Result<Option<Couple>>;
}
