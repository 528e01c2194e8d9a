use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::couples::couples_errors::CoupleError;
use crate::couples::couples_model::{
    generate_invitation_token, Couple, CoupleRequest, CoupleStatusView, CoupleTarget, CoupleView,
    NewCoupleRequest, RegisterWithInvitation, RequestDirection, RequestView,
};
use crate::couples::couples_traits::{CoupleRepositoryTrait, CoupleServiceTrait};
use crate::email::InvitationMailer;
use crate::errors::Result;
use crate::users::{
    is_valid_email, normalize_email, RegisterUser, User, UserServiceTrait, UserSummary,
};

/// Service driving the pairing workflow.
pub struct CoupleService {
    couple_repo: Arc<dyn CoupleRepositoryTrait>,
    user_service: Arc<dyn UserServiceTrait>,
    mailer: Option<Arc<dyn InvitationMailer>>,
}

impl CoupleService {
    pub fn new(
        couple_repo: Arc<dyn CoupleRepositoryTrait>,
        user_service: Arc<dyn UserServiceTrait>,
        mailer: Option<Arc<dyn InvitationMailer>>,
    ) -> Self {
        Self {
            couple_repo,
            user_service,
            mailer,
        }
    }

    fn ensure_not_coupled(&self, user_id: &str) -> Result<()> {
        if self.couple_repo.get_couple_by_user(user_id)?.is_some() {
            return Err(CoupleError::AlreadyCoupled.into());
        }
        Ok(())
    }

    fn load_request(&self, request_id: &str) -> Result<CoupleRequest> {
        self.couple_repo
            .get_request(request_id)?
            .ok_or_else(|| CoupleError::RequestNotFound.into())
    }

    /// Sends the invitation on a detached task. Delivery failures are logged
    /// and never reach the caller.
    fn dispatch_invitation(&self, to: String, inviter_name: String, token: String) {
        let Some(mailer) = self.mailer.clone() else {
            debug!("No mailer configured, skipping invitation to {}", to);
            return;
        };

        tokio::spawn(async move {
            match mailer.send_invitation(&to, &inviter_name, &token).await {
                Ok(()) => info!("Invitation email sent to {}", to),
                Err(e) => warn!("Failed to send invitation email to {}: {}", to, e),
            }
        });
    }

    fn partner_summary(&self, target: &CoupleTarget) -> Result<UserSummary> {
        match target {
            CoupleTarget::User(user_id) => {
                let user = self.user_service.get_user(user_id)?;
                Ok(UserSummary::from(&user))
            }
            CoupleTarget::Email(email) => Ok(UserSummary::unregistered(email)),
        }
    }

    fn request_view(&self, request: &CoupleRequest, user_id: &str) -> Result<RequestView> {
        let (direction, partner) = if request.requester_user_id == user_id {
            (
                RequestDirection::Outgoing,
                self.partner_summary(&request.target)?,
            )
        } else {
            let requester = self.user_service.get_user(&request.requester_user_id)?;
            (RequestDirection::Incoming, UserSummary::from(&requester))
        };

        Ok(RequestView {
            id: request.id.clone(),
            direction,
            status: request.status,
            partner,
            created_at: request.created_at,
        })
    }

    fn couple_view(&self, couple: &Couple, user_id: &str) -> Result<CoupleView> {
        let partner = self.user_service.get_user(couple.partner_of(user_id))?;
        Ok(CoupleView {
            id: couple.id.clone(),
            partner: UserSummary::from(&partner),
            created_at: couple.created_at,
        })
    }
}

#[async_trait]
impl CoupleServiceTrait for CoupleService {
    async fn request_couple(
        &self,
        requester_id: &str,
        partner_email: &str,
    ) -> Result<RequestView> {
        let requester = self.user_service.get_user(requester_id)?;

        let email = normalize_email(partner_email);
        if email.is_empty() {
            return Err(CoupleError::PartnerRequired.into());
        }
        if !is_valid_email(&email) {
            return Err(CoupleError::InvalidPartnerEmail.into());
        }
        if email == requester.email {
            return Err(CoupleError::CannotInviteSelf.into());
        }

        let target_user = self.user_service.find_by_email(&email)?;
        if let Some(target) = &target_user {
            if target.id == requester.id {
                return Err(CoupleError::CannotInviteSelf.into());
            }
        }

        self.ensure_not_coupled(&requester.id)?;

        if let Some(target) = &target_user {
            self.ensure_not_coupled(&target.id)?;
            if self
                .couple_repo
                .find_pending_request_between(&requester.id, &target.id)?
                .is_some()
            {
                return Err(CoupleError::PendingRequestExists.into());
            }
            if !self
                .couple_repo
                .list_pending_requests_for_user(&target.id)?
                .is_empty()
            {
                return Err(CoupleError::PendingRequestExists.into());
            }
        }

        if !self
            .couple_repo
            .list_pending_requests_for_user(&requester.id)?
            .is_empty()
        {
            return Err(CoupleError::PendingRequestExists.into());
        }

        let target = match &target_user {
            Some(user) => CoupleTarget::User(user.id.clone()),
            None => CoupleTarget::Email(email.clone()),
        };

        let request = self
            .couple_repo
            .create_request(NewCoupleRequest {
                requester_user_id: requester.id.clone(),
                target,
                invitation_token: generate_invitation_token(),
            })
            .await?;
        debug!(
            "Created couple request {} from {}",
            request.id, request.requester_user_id
        );

        self.dispatch_invitation(
            email.clone(),
            requester.name.clone(),
            request.invitation_token.clone(),
        );

        let partner = match &target_user {
            Some(user) => UserSummary::from(user),
            None => UserSummary::unregistered(&email),
        };

        Ok(RequestView {
            id: request.id,
            direction: RequestDirection::Outgoing,
            status: request.status,
            partner,
            created_at: request.created_at,
        })
    }

    async fn accept_couple(&self, request_id: &str, current_user_id: &str) -> Result<CoupleView> {
        let request = self.load_request(request_id)?;
        if !request.is_pending() {
            return Err(CoupleError::RequestNotPending.into());
        }

        let target_id = request
            .target
            .user_id()
            .ok_or(CoupleError::RequestNotAuthorized)?;
        if target_id != current_user_id {
            return Err(CoupleError::RequestNotAuthorized.into());
        }

        self.ensure_not_coupled(&request.requester_user_id)?;
        self.ensure_not_coupled(target_id)?;

        let couple = self
            .couple_repo
            .accept_request(&request.id, &request.requester_user_id, target_id)
            .await?;
        info!("Couple {} formed from request {}", couple.id, request.id);

        self.couple_view(&couple, current_user_id)
    }

    async fn resend_couple(&self, request_id: &str, current_user_id: &str) -> Result<()> {
        let request = self.load_request(request_id)?;
        if !request.is_pending() {
            return Err(CoupleError::RequestNotPending.into());
        }
        if request.requester_user_id != current_user_id {
            return Err(CoupleError::RequestNotAuthorized.into());
        }

        let to = match &request.target {
            CoupleTarget::User(user_id) => self.user_service.get_user(user_id)?.email,
            CoupleTarget::Email(email) => email.clone(),
        };
        let requester = self.user_service.get_user(&request.requester_user_id)?;

        self.dispatch_invitation(to, requester.name, request.invitation_token);
        Ok(())
    }

    fn get_status(&self, user_id: &str) -> Result<CoupleStatusView> {
        let couple = self
            .couple_repo
            .get_couple_by_user(user_id)?
            .map(|couple| self.couple_view(&couple, user_id))
            .transpose()?;

        let mut incoming = Vec::new();
        let mut outgoing = Vec::new();
        for request in self.couple_repo.list_pending_requests_for_user(user_id)? {
            let view = self.request_view(&request, user_id)?;
            match view.direction {
                RequestDirection::Incoming => incoming.push(view),
                RequestDirection::Outgoing => outgoing.push(view),
            }
        }

        Ok(CoupleStatusView {
            couple,
            incoming,
            outgoing,
        })
    }

    async fn register_with_invitation(&self, input: RegisterWithInvitation) -> Result<User> {
        let request = self
            .couple_repo
            .get_request_by_invitation_token(input.invitation_token.trim())?
            .filter(CoupleRequest::is_pending)
            .ok_or(CoupleError::InvalidInvitationToken)?;

        let invited_email = match &request.target {
            CoupleTarget::Email(email) => email,
            CoupleTarget::User(_) => return Err(CoupleError::InvitationAlreadyClaimed.into()),
        };
        if *invited_email != normalize_email(&input.email) {
            return Err(CoupleError::InvitationEmailMismatch.into());
        }

        let user = self
            .user_service
            .register(RegisterUser {
                email: input.email,
                password: input.password,
                name: input.name,
            })
            .await?;

        self.couple_repo
            .bind_request_target(&request.id, &user.id)
            .await?;
        info!("Invitation {} claimed by user {}", request.id, user.id);

        Ok(user)
    }

    fn get_couple_for_user(&self, user_id: &str) -> Result<Option<Couple>> {
        self.couple_repo.get_couple_by_user(user_id)
    }
}
