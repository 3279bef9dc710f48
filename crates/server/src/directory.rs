//! Member directory endpoints (admin only, except the public index).

use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use engine::MemberUpdate;
use serde::Deserialize;

use crate::{ServerError, auth::Identity, pages, server::ServerState};

#[derive(Debug, Deserialize)]
pub struct AddMemberForm {
    #[serde(default)]
    id: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Without a `username` field the form is a lookup and the record is shown
/// instead of being updated.
#[derive(Debug, Deserialize)]
pub struct UpdateMemberForm {
    #[serde(default)]
    id: String,
    username: Option<String>,
    membership_date: Option<String>,
    membership_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMemberForm {
    #[serde(default)]
    username: String,
}

/// Public directory of every member.
pub async fn index(State(state): State<ServerState>) -> Result<Html<String>, ServerError> {
    let members = state.engine.list_members().await?;
    Ok(pages::directory(&members))
}

pub async fn admin_home(Extension(identity): Extension<Identity>) -> Html<String> {
    pages::admin_home(&identity)
}

pub async fn all_members(State(state): State<ServerState>) -> Result<Html<String>, ServerError> {
    let members = state.engine.list_members().await?;
    Ok(pages::all_members(&members))
}

pub async fn add_member_page() -> Html<String> {
    pages::add_member()
}

pub async fn add_member(
    State(state): State<ServerState>,
    Form(form): Form<AddMemberForm>,
) -> Result<Redirect, ServerError> {
    state
        .engine
        .add_member(&form.id, &form.username, &form.password)
        .await?;
    Ok(Redirect::to("/admin_home"))
}

pub async fn update_member_page() -> Html<String> {
    pages::update_member_lookup()
}

pub async fn update_member(
    State(state): State<ServerState>,
    Form(form): Form<UpdateMemberForm>,
) -> Result<Response, ServerError> {
    let id = engine::parse_member_id(&form.id)?;

    if form.username.is_none() {
        let record = state.engine.member_record(id).await?;
        return Ok(pages::update_member_form(&record).into_response());
    }

    state
        .engine
        .update_member(
            id,
            MemberUpdate {
                username: form.username,
                membership_date: form.membership_date,
                membership_time: form.membership_time,
            },
        )
        .await?;
    Ok(Redirect::to("/admin_home").into_response())
}

pub async fn delete_member_page() -> Html<String> {
    pages::delete_member()
}

pub async fn delete_member(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    Form(form): Form<DeleteMemberForm>,
) -> Result<String, ServerError> {
    let username = state
        .engine
        .delete_member(&form.username, identity.id)
        .await?;
    Ok(format!("'{username}' deleted."))
}
