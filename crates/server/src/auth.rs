//! Session/auth guard.
//!
//! Requests to protected routes go through `authenticate`, which resolves the
//! session cookie to an [`Identity`], and then through one of the role guards
//! ([`admin_required`], [`user_required`]) before reaching the handler.

use axum::{
    Extension, Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use engine::{EngineError, Member, Role};
use serde::Deserialize;

use crate::{
    ServerError, pages,
    server::ServerState,
    session::SESSION_COOKIE,
};

/// The authenticated member of the current request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

impl From<Member> for Identity {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            username: member.username,
            role: member.role,
        }
    }
}

impl Identity {
    /// Fail with 403 unless the identity has `role`.
    pub fn require(&self, role: Role) -> Result<(), ServerError> {
        if self.role == role {
            return Ok(());
        }
        tracing::warn!("'{}' ({}) denied a {role} route", self.username, self.role);
        let message = match role {
            Role::Admin => "admins only",
            Role::User => "members only",
        };
        Err(EngineError::Forbidden(message.to_string()).into())
    }
}

fn to_login() -> Response {
    Redirect::to("/login").into_response()
}

/// Resolve the session cookie to an [`Identity`] or redirect to the login page.
pub(crate) async fn authenticate(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
        return to_login();
    };
    let Some(session) = state.sessions.get_session(&token).await else {
        return to_login();
    };

    let member = match state.engine.member(session.member_id).await {
        Ok(member) => member,
        Err(EngineError::KeyNotFound(_)) => {
            // The member was deleted while logged in.
            state.sessions.delete_session(&token).await;
            return to_login();
        }
        Err(err) => return ServerError::from(err).into_response(),
    };

    request.extensions_mut().insert(Identity::from(member));
    next.run(request).await
}

pub(crate) async fn admin_required(
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    identity.require(Role::Admin)?;
    Ok(next.run(request).await)
}

pub(crate) async fn user_required(
    Extension(identity): Extension<Identity>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    identity.require(Role::User)?;
    Ok(next.run(request).await)
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub async fn login_page() -> Html<String> {
    pages::login()
}

/// Check the credentials, open a session and redirect to the role's home.
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ServerError> {
    let member = state
        .engine
        .authenticate(&form.username, &form.password)
        .await?;
    let token = state.sessions.create_session(member.id).await;
    tracing::info!("'{}' logged in as {}", member.username, member.role);

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    Ok((jar.add(cookie), Redirect::to(member.role.home())))
}

pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.delete_session(cookie.value()).await;
    }
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Redirect::to("/login"),
    )
}
