use anyhow::{Context, Result};
use octocrab::Octocrab;

use crate::github::types::User;

/// Login of the account the token belongs to (`GET /user`)
pub async fn get_username(client: &Octocrab) -> Result<String> {
    let user: User = client
        .get("/user", None::<&()>)
        .await
        .context("Failed to fetch authenticated user")?;
    Ok(user.login)
}
