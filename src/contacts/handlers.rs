use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    contacts::{
        dto::{ContactResponse, CreateContactRequest, SearchContactRequest, UpdateContactRequest},
        services,
    },
    error::Result,
    extract::{AppJson, AppQuery},
    paging::Pageable,
    response::{DataResponse, OK},
    state::AppState,
    users::AuthUser,
    validation::parse_id,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(search_contacts).post(create_contact))
        .route(
            "/contacts/:contactId",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn create_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<CreateContactRequest>,
) -> Result<(StatusCode, Json<DataResponse<ContactResponse>>)> {
    let contact = services::create(&state.db, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(contact))))
}

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn get_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<DataResponse<ContactResponse>>> {
    let id = parse_id("contactId", &contact_id)?;
    let contact = services::get(&state.db, &user, id).await?;
    Ok(Json(DataResponse::new(contact)))
}

#[instrument(skip(state, user, payload), fields(username = %user.username))]
pub async fn update_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<String>,
    AppJson(mut payload): AppJson<UpdateContactRequest>,
) -> Result<Json<DataResponse<ContactResponse>>> {
    payload.id = parse_id("contactId", &contact_id)?;
    let contact = services::update(&state.db, &user, payload).await?;
    Ok(Json(DataResponse::new(contact)))
}

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn delete_contact(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(contact_id): Path<String>,
) -> Result<Json<DataResponse<&'static str>>> {
    let id = parse_id("contactId", &contact_id)?;
    services::delete(&state.db, &user, id).await?;
    Ok(Json(DataResponse::new(OK)))
}

#[instrument(skip(state, user), fields(username = %user.username))]
pub async fn search_contacts(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppQuery(query): AppQuery<SearchContactRequest>,
) -> Result<Json<Pageable<ContactResponse>>> {
    let page = services::search(&state.db, &user, query).await?;
    Ok(Json(page))
}
