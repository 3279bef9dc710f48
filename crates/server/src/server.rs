use axum::{
    Router,
    middleware,
    routing::get,
};

use std::sync::Arc;

use crate::{
    auth::{self, admin_required, authenticate, user_required},
    directory, self_service,
    session::SessionStore,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub sessions: SessionStore,
}

/// Build the application router.
///
/// Protected routes run `authenticate` first, then the role guard of their
/// group, then the handler.
pub fn router(engine: Engine, sessions: SessionStore) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        sessions,
    };

    let admin = Router::new()
        .route("/admin_home", get(directory::admin_home))
        .route("/all_members", get(directory::all_members))
        .route(
            "/add_member",
            get(directory::add_member_page).post(directory::add_member),
        )
        .route(
            "/update_member",
            get(directory::update_member_page).post(directory::update_member),
        )
        .route(
            "/delete_member",
            get(directory::delete_member_page).post(directory::delete_member),
        )
        .route_layer(middleware::from_fn(admin_required));

    let member = Router::new()
        .route("/user_home", get(self_service::user_home))
        .route("/view_details", get(self_service::view_details))
        .route(
            "/renew_membership",
            get(self_service::renew_page).post(self_service::renew),
        )
        .route_layer(middleware::from_fn(user_required));

    let protected = admin
        .merge(member)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/", get(directory::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .merge(protected)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    sessions: SessionStore,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, sessions)).await
}
