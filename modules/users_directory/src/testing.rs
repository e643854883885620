//! Scoped user fixtures.
//!
//! A fixture creates a throwaway user through the public client, hands it to
//! the test body, and removes it on every exit path, including panics raised
//! by failed assertions.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Context;
use futures::FutureExt;

use crate::contract::client::UsersDirectoryApi;
use crate::contract::model::{NewUser, User};

const FIXTURE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// A user with a random name and an email unlikely to collide with anything else.
pub fn random_new_user() -> NewUser {
    let alphabet: Vec<char> = FIXTURE_ALPHABET.chars().collect();
    let tag = nanoid::nanoid!(12, &alphabet);
    NewUser {
        name: format!("Fixture User {}", &tag[..6]),
        email: format!("{tag}@fixtures.example.com"),
    }
}

/// Create a random user, run `body` with it, then delete the user.
///
/// Deletion happens even when `body` panics; the panic is re-raised afterwards.
pub async fn with_user<F, Fut, T>(client: &Arc<dyn UsersDirectoryApi>, body: F) -> anyhow::Result<T>
where
    F: FnOnce(User) -> Fut,
    Fut: Future<Output = T>,
{
    let user = client
        .create_user(random_new_user())
        .await
        .context("fixture: failed to create user")?;
    let id = user.id;

    let outcome = AssertUnwindSafe(body(user)).catch_unwind().await;

    if let Err(e) = client.delete_user(id).await {
        tracing::warn!(user_id = %id, "fixture: cleanup failed: {}", e);
    }

    match outcome {
        Ok(value) => Ok(value),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
