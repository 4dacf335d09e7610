use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: Uuid,
    pub display_name: String,
    pub is_verified: bool,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub display_name: String,
    #[serde(default)]
    pub is_verified: bool,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub display_name: Option<String>,
    pub is_verified: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListFilter {
    pub is_verified: Option<bool>,
}

/// What the server saw, returned by `/api/echo`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Echo {
    pub method: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, User>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/hello", get(hello))
        .route("/api/echo", any(echo))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello() -> Json<Value> {
    Json(serde_json::json!({ "message": "Hello, world!" }))
}

async fn echo(
    method: Method,
    Query(query): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
        .collect();
    let body = if body.is_empty() {
        None
    } else {
        Some(
            serde_json::from_slice(&body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned())),
        )
    };
    debug!(%method, "echo");
    Json(Echo {
        method: method.to_string(),
        query,
        headers,
        body,
    })
}

async fn list_users(State(db): State<Db>, Query(filter): Query<ListFilter>) -> Json<Vec<User>> {
    let users = db.read().await;
    let mut matching: Vec<User> = users
        .values()
        .filter(|u| filter.is_verified.map_or(true, |v| u.is_verified == v))
        .cloned()
        .collect();
    matching.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Json(matching)
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let user = User {
        user_id: Uuid::new_v4(),
        display_name: input.display_name,
        is_verified: input.is_verified,
    };
    debug!(user_id = %user.user_id, "created user");
    db.write().await.insert(user.user_id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(db): State<Db>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, StatusCode> {
    let users = db.read().await;
    users.get(&user_id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(db): State<Db>,
    Path(user_id): Path<Uuid>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    let user = users.get_mut(&user_id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(display_name) = input.display_name {
        user.display_name = display_name;
    }
    if let Some(is_verified) = input.is_verified {
        user.is_verified = is_verified;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(db): State<Db>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, StatusCode> {
    let mut users = db.write().await;
    users.remove(&user_id).map(Json).ok_or(StatusCode::NOT_FOUND)
}
