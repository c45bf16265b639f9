//! HttpUserApi against a local axum server

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use userdesk_core::{
    ApiError, ClientOptions, CreateIdPolicy, Field, HttpUserApi, Msg, NewUser, UserApi, UserId,
    UserList, UserRecord,
};

type Store = Arc<Mutex<Vec<UserRecord>>>;

async fn list(State(store): State<Store>) -> Json<Vec<UserRecord>> {
    Json(store.lock().unwrap().clone())
}

async fn create(State(store): State<Store>, Json(body): Json<NewUser>) -> impl IntoResponse {
    let mut users = store.lock().unwrap();
    let id = UserId(users.iter().map(|u| u.id.0).max().unwrap_or(0) + 10);
    let record = body.with_id(id);
    users.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn replace(
    State(store): State<Store>,
    Path(id): Path<u64>,
    Json(body): Json<UserRecord>,
) -> impl IntoResponse {
    let mut users = store.lock().unwrap();
    match users.iter_mut().find(|u| u.id == UserId(id)) {
        Some(user) => {
            *user = body.clone();
            Json(body).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "message": format!("user {id} not found") })),
        )
            .into_response(),
    }
}

async fn remove(State(store): State<Store>, Path(id): Path<u64>) -> StatusCode {
    let mut users = store.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != UserId(id));
    if users.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "database is on fire")
}

async fn slow() -> Json<Vec<UserRecord>> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(Vec::new())
}

fn seed() -> Vec<UserRecord> {
    vec![UserRecord {
        id: UserId(1),
        name: "Leanne Graham".to_string(),
        email: "Sincere@april.biz".to_string(),
        department: "Sales".to_string(),
    }]
}

async fn serve(store: Store) -> String {
    let app = Router::new()
        .route("/users", get(list).post(create))
        .route("/users/{id}", axum::routing::put(replace).delete(remove))
        .route("/broken", get(broken))
        .route("/slow", get(slow))
        .with_state(store);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn crud_against_server() {
    let store: Store = Arc::new(Mutex::new(seed()));
    let base = serve(Arc::clone(&store)).await;
    let api = HttpUserApi::new(format!("{base}/users/"), &ClientOptions::default()).unwrap();

    assert_eq!(api.list_users().await.unwrap(), seed());

    let created = api
        .create_user(&NewUser {
            name: "B".to_string(),
            email: "b@x.com".to_string(),
            department: "Eng".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.id, UserId(11));

    let mut changed = created.clone();
    changed.department = "Research".to_string();
    assert_eq!(api.update_user(&changed).await.unwrap(), changed);

    api.delete_user(UserId(1)).await.unwrap();
    assert_eq!(store.lock().unwrap().clone(), vec![changed]);
}

#[tokio::test]
async fn error_bodies_become_messages() {
    let store: Store = Arc::new(Mutex::new(seed()));
    let base = serve(store).await;
    let api = HttpUserApi::new(format!("{base}/users"), &ClientOptions::default()).unwrap();

    let mut missing = seed()[0].clone();
    missing.id = UserId(99);
    let err = api.update_user(&missing).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "404 Not Found: not_found (user 99 not found)"
    );

    let err = api.delete_user(UserId(99)).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND));

    let broken = HttpUserApi::new(format!("{base}/broken"), &ClientOptions::default()).unwrap();
    let err = broken.list_users().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "500 Internal Server Error: database is on fire"
    );
}

#[tokio::test]
async fn timeout_applies_when_configured() {
    let base = serve(Arc::new(Mutex::new(Vec::new()))).await;
    let options = ClientOptions {
        timeout: Some(Duration::from_millis(100)),
        insecure: false,
    };
    let api = HttpUserApi::new(format!("{base}/slow"), &options).unwrap();

    let err = api.list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn component_over_http() {
    let store: Store = Arc::new(Mutex::new(seed()));
    let base = serve(Arc::clone(&store)).await;
    let api = HttpUserApi::new(format!("{base}/users"), &ClientOptions::default()).unwrap();
    let mut list = UserList::new(api, CreateIdPolicy::Sequential);

    list.mount();
    list.settle().await;
    assert_eq!(list.state().users(), seed().as_slice());

    list.dispatch(Msg::Input(Field::Name, "B".to_string()));
    list.dispatch(Msg::Input(Field::Email, "b@x.com".to_string()));
    list.dispatch(Msg::Input(Field::Department, "Eng".to_string()));
    list.dispatch(Msg::Submit);
    list.settle().await;

    // Local id is sequential, the server stored id 11
    assert_eq!(list.state().users()[1].id, UserId(2));
    assert_eq!(store.lock().unwrap()[1].id, UserId(11));
    assert_eq!(
        list.state().notice().unwrap().text,
        "User added successfully!"
    );
}
