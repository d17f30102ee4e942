//! HTTP bindings for [`UserService`].

use std::sync::Arc;

use apiary::core::Json;
use apiary::extract::{body, path, writer};
use apiary::server::{RegistrationError, RouteTable};

use crate::model::{User, UserId};
use crate::service::UserService;

/// Builds the route table for `service`.
///
/// | Route | Method |
/// |---|---|
/// | `GET /users` | [`UserService::list_users`] |
/// | `GET /users/:id` | [`UserService::get_user`] |
/// | `GET /users/:id/avatar` | [`UserService::get_avatar`] |
/// | `POST /users` | [`UserService::create_user`] |
/// | `POST /shutdown` | [`UserService::shutdown`] |
pub fn routes(service: &Arc<UserService>) -> Result<RouteTable, RegistrationError> {
    let mut table = RouteTable::new();

    let svc = Arc::clone(service);
    table.get("/users", (), move |()| svc.list_users().map(Json))?;

    let svc = Arc::clone(service);
    table.get("/users/:id", (path::<UserId>("id"),), move |(id,)| {
        svc.get_user(id).map(Json)
    })?;

    let svc = Arc::clone(service);
    table.get("/users/:id/avatar", (path::<UserId>("id"),), move |(id,)| {
        svc.get_avatar(id)
    })?;

    let svc = Arc::clone(service);
    table.post("/users", (body::<User>(),), move |(user,)| svc.create_user(user))?;

    let svc = Arc::clone(service);
    table.post("/shutdown", (writer(),), move |(out,)| svc.shutdown(&out))?;

    Ok(table)
}
