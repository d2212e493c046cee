use common::UserId;
use store::{CartStore, NewUser, StoreError, UserStore};

use super::require_user;
use crate::auth::{AuthError, Identity, PasswordHasher, TokenKeys};
use crate::user::validate_password;
use crate::{DomainError, User};

/// Registration, login, and profile lookup.
pub struct UserService<S: UserStore + CartStore> {
    store: S,
    hasher: PasswordHasher,
    keys: TokenKeys,
}

impl<S: UserStore + CartStore> UserService<S> {
    pub fn new(store: S, hasher: PasswordHasher, keys: TokenKeys) -> Self {
        Self {
            store,
            hasher,
            keys,
        }
    }

    /// Registers a user and gives them an empty cart.
    ///
    /// Password rules are checked before anything is written.
    #[tracing::instrument(skip(self, password, confirm_password))]
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, DomainError> {
        if let Err(e) = validate_password(password, confirm_password) {
            tracing::warn!(%username, reason = %e, "user not created");
            return Err(e.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let record = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if let StoreError::DuplicateUsername(_) = e {
                    tracing::warn!(%username, "user not created: username taken");
                }
            })?;

        let cart = self.store.create_cart(record.id).await?;

        metrics::counter!("users_created_total").increment(1);
        tracing::info!(%username, user_id = %record.id, "user created");

        Ok(User {
            cart_id: Some(cart.id),
            ..User::from(record)
        })
    }

    /// Checks credentials and issues an access token for the user.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let Some(user) = self.store.find_user_by_username(username).await? else {
            tracing::warn!(%username, "login failed: unknown user");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::warn!(%username, "login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.keys.issue(&user.username)?;
        tracing::info!(%username, "user logged in");
        Ok(token)
    }

    /// Returns the caller's own profile by username.
    #[tracing::instrument(skip(self, identity))]
    pub async fn find_by_username(
        &self,
        identity: &Identity,
        username: &str,
    ) -> Result<User, DomainError> {
        identity.authorize(username)?;
        let record = require_user(&self.store, username).await?;
        Ok(User::from(record))
    }

    /// Returns the caller's own profile by id.
    ///
    /// The token subject is resolved to a user first; the request is
    /// forbidden unless that user's id is `id`.
    #[tracing::instrument(skip(self, identity))]
    pub async fn find_by_id(&self, identity: &Identity, id: UserId) -> Result<User, DomainError> {
        let Some(subject) = identity.subject() else {
            tracing::warn!(requested = %id, "no verified token subject");
            metrics::counter!("auth_denied_total").increment(1);
            return Err(AuthError::Forbidden.into());
        };

        let Some(caller) = self.store.find_user_by_username(subject).await? else {
            tracing::warn!(token_subject = %subject, "token subject is not a registered user");
            metrics::counter!("auth_denied_total").increment(1);
            return Err(AuthError::Forbidden.into());
        };

        if caller.id != id {
            tracing::warn!(requested = %id, caller = %caller.id, "user id does not match token subject");
            metrics::counter!("auth_denied_total").increment(1);
            return Err(AuthError::Forbidden.into());
        }

        let record = self
            .store
            .find_user_by_id(id)
            .await?
            .ok_or(DomainError::UserIdNotFound(id))?;
        Ok(User::from(record))
    }
}
