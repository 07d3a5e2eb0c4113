use chrono::{NaiveDateTime, Utc};
use ulid::Ulid;

use super::repository::{self, Session};
use crate::types::{AuthContext, Context};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum Error {
    UnexpectedError,
    InvalidSession,
    ExpiredToken,
}

type Result<T> = std::result::Result<T, Error>;

struct TokenPair {
    access_token: String,
    refresh_token: String,
    access_token_expires_at: NaiveDateTime,
    refresh_token_expires_at: NaiveDateTime,
}

fn generate_tokens(auth: &AuthContext, now: NaiveDateTime) -> TokenPair {
    TokenPair {
        access_token: Ulid::new().to_string(),
        refresh_token: Ulid::new().to_string(),
        access_token_expires_at: now + auth.access_token_ttl,
        refresh_token_expires_at: now + auth.refresh_token_ttl,
    }
}

fn is_expired(expires_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    expires_at < now
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

pub async fn create_session(ctx: Arc<Context>, user_id: String) -> Result<Session> {
    let tokens = generate_tokens(&ctx.auth, Utc::now().naive_utc());

    repository::create(
        &ctx.db_conn.pool,
        repository::SessionCreationPayload {
            user_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_at: tokens.access_token_expires_at,
            refresh_token_expires_at: tokens.refresh_token_expires_at,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)
}

pub async fn regenerate_tokens_for_session(
    ctx: Arc<Context>,
    refresh_token: String,
) -> Result<Session> {
    let session = verify_refresh_token(ctx.clone(), refresh_token).await?;
    let tokens = generate_tokens(&ctx.auth, Utc::now().naive_utc());

    repository::update_by_id(
        &ctx.db_conn.pool,
        session.id,
        repository::UpdateSessionPayload {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_token_expires_at: tokens.access_token_expires_at,
            refresh_token_expires_at: tokens.refresh_token_expires_at,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)
}

pub async fn verify_access_token(ctx: Arc<Context>, access_token: String) -> Result<Session> {
    let session = repository::find_by_access_token(&ctx.db_conn.pool, access_token)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::InvalidSession)?;

    if is_expired(session.access_token_expires_at, Utc::now().naive_utc()) {
        return Err(Error::ExpiredToken);
    };

    Ok(session)
}

pub async fn verify_refresh_token(ctx: Arc<Context>, refresh_token: String) -> Result<Session> {
    let session = repository::find_by_refresh_token(&ctx.db_conn.pool, refresh_token)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::InvalidSession)?;

    if is_expired(session.refresh_token_expires_at, Utc::now().naive_utc()) {
        return Err(Error::ExpiredToken);
    };

    Ok(session)
}
