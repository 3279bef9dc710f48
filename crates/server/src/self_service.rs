//! Self-service endpoints for members.

use axum::{Extension, extract::State, response::Html};

use crate::{ServerError, auth::Identity, pages, server::ServerState};

pub async fn user_home(Extension(identity): Extension<Identity>) -> Html<String> {
    pages::user_home(&identity)
}

pub async fn view_details(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Html<String>, ServerError> {
    let record = state.engine.member_record(identity.id).await?;
    Ok(pages::view_details(&record))
}

pub async fn renew_page(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<Html<String>, ServerError> {
    let membership = state.engine.membership(identity.id).await?;
    Ok(pages::renew_membership(membership.as_ref()))
}

/// Advance the caller's membership by one year.
pub async fn renew(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
) -> Result<String, ServerError> {
    let membership = state.engine.renew_membership(identity.id).await?;
    Ok(format!(
        "Membership renewed until {}.",
        membership.membership_date
    ))
}
