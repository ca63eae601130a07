use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::modules::master::crud::{MasterCrud, MasterError};
use crate::modules::master::model::{City, CompanyConfig, Country, CountryWithCount, StateWithCount};
use crate::modules::master::schema::{
    CreateCityRequest, CreateCountryRequest, CreateStateRequest, UpdateLogoRequest,
};
use crate::modules::ErrorResponse;
use crate::AppState;

fn reply_err(e: MasterError) -> (StatusCode, Json<ErrorResponse>) {
    (e.status_code(), Json(ErrorResponse::new(e.to_string())))
}

fn bad_request(e: impl ToString) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string())))
}

pub async fn get_company_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompanyConfig>, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    Ok(Json(crud.get_config().await.map_err(reply_err)?))
}

pub async fn update_logo(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateLogoRequest>,
) -> Result<Json<CompanyConfig>, (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = MasterCrud::new(state.db.clone());
    Ok(Json(
        crud.update_logo(&req.logo, &state.storage)
            .await
            .map_err(reply_err)?,
    ))
}

pub async fn delete_logo(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CompanyConfig>, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    Ok(Json(crud.clear_logo(&state.storage).await.map_err(reply_err)?))
}

pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CountryWithCount>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    Ok(Json(crud.list_countries().await.map_err(reply_err)?))
}

pub async fn create_country(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCountryRequest>,
) -> Result<(StatusCode, Json<Country>), (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = MasterCrud::new(state.db.clone());
    let country = crud.create_country(&req.name).await.map_err(reply_err)?;
    Ok((StatusCode::CREATED, Json(country)))
}

pub async fn delete_country(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    crud.delete_country(&id).await.map_err(reply_err)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_states(
    State(state): State<Arc<AppState>>,
    Path(country_id): Path<String>,
) -> Result<Json<Vec<StateWithCount>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    Ok(Json(crud.list_states(&country_id).await.map_err(reply_err)?))
}

pub async fn create_state(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStateRequest>,
) -> Result<(StatusCode, Json<crate::modules::master::model::State>), (StatusCode, Json<ErrorResponse>)>
{
    req.validate().map_err(bad_request)?;

    let crud = MasterCrud::new(state.db.clone());
    let created = crud
        .create_state(&req.name, &req.country_id)
        .await
        .map_err(reply_err)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_state(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    crud.delete_state(&id).await.map_err(reply_err)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_cities(
    State(state): State<Arc<AppState>>,
    Path(state_id): Path<String>,
) -> Result<Json<Vec<City>>, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    Ok(Json(crud.list_cities(&state_id).await.map_err(reply_err)?))
}

pub async fn create_city(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCityRequest>,
) -> Result<(StatusCode, Json<City>), (StatusCode, Json<ErrorResponse>)> {
    req.validate().map_err(bad_request)?;

    let crud = MasterCrud::new(state.db.clone());
    let city = crud
        .create_city(&req.name, &req.state_id)
        .await
        .map_err(reply_err)?;
    Ok((StatusCode::CREATED, Json(city)))
}

pub async fn delete_city(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let crud = MasterCrud::new(state.db.clone());
    crud.delete_city(&id).await.map_err(reply_err)?;
    Ok(StatusCode::NO_CONTENT)
}
