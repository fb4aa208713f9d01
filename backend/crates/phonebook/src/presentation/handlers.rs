//! HTTP Handlers
//!
//! All handlers sit behind the session middleware and take the caller from
//! [`CurrentAccount`].

use std::sync::Arc;

use auth::middleware::CurrentAccount;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use kernel::id::PhoneId;

use crate::application::{
    AddPhoneInput, AddPhoneUseCase, DeletePhoneUseCase, SearchPhonesUseCase, UpdatePhoneInput,
    UpdatePhoneUseCase,
};
use crate::domain::entities::Phone;
use crate::domain::repository::PhoneRepository;
use crate::error::{PhoneError, PhoneResult};
use crate::presentation::dto::{
    AddPhoneRequest, MessageResponse, SearchParams, UpdatePhoneRequest,
};

/// Shared state for phonebook handlers
#[derive(Clone)]
pub struct PhoneAppState<R>
where
    R: PhoneRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> PhoneResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| PhoneError::Validation(rejection.body_text()))
}

/// POST /user/phone
pub async fn add_phone<R>(
    State(state): State<PhoneAppState<R>>,
    CurrentAccount(caller): CurrentAccount,
    payload: Result<Json<AddPhoneRequest>, JsonRejection>,
) -> PhoneResult<Json<MessageResponse>>
where
    R: PhoneRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    AddPhoneUseCase::new(state.repo.clone())
        .execute(
            caller,
            AddPhoneInput {
                phone_number: req.phone_number,
                description: req.description,
                is_fax: req.is_fax,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Phone added successfully")))
}

/// GET /user/phone?q=
pub async fn search_phones<R>(
    State(state): State<PhoneAppState<R>>,
    CurrentAccount(caller): CurrentAccount,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> PhoneResult<Json<Vec<Phone>>>
where
    R: PhoneRepository + Clone + Send + Sync + 'static,
{
    let Query(params) = params.map_err(|e| PhoneError::Validation(e.body_text()))?;

    let phones = SearchPhonesUseCase::new(state.repo.clone())
        .execute(caller, &params.q)
        .await?;

    Ok(Json(phones))
}

/// PUT /user/phone
pub async fn update_phone<R>(
    State(state): State<PhoneAppState<R>>,
    CurrentAccount(caller): CurrentAccount,
    payload: Result<Json<UpdatePhoneRequest>, JsonRejection>,
) -> PhoneResult<Json<MessageResponse>>
where
    R: PhoneRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(payload)?;

    UpdatePhoneUseCase::new(state.repo.clone())
        .execute(
            caller,
            UpdatePhoneInput {
                id: req.id,
                phone_number: req.phone_number,
                description: req.description,
                is_fax: req.is_fax,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Phone updated successfully")))
}

/// DELETE /user/phone/{phone_id}
pub async fn delete_phone<R>(
    State(state): State<PhoneAppState<R>>,
    CurrentAccount(caller): CurrentAccount,
    phone_id: Result<Path<i64>, PathRejection>,
) -> PhoneResult<Json<MessageResponse>>
where
    R: PhoneRepository + Clone + Send + Sync + 'static,
{
    let Path(phone_id) = phone_id.map_err(|e| PhoneError::Validation(e.body_text()))?;
    let phone_id = PhoneId::new(phone_id).map_err(|e| PhoneError::Validation(e.to_string()))?;

    DeletePhoneUseCase::new(state.repo.clone())
        .execute(caller, phone_id)
        .await?;

    Ok(Json(MessageResponse::new("Phone deleted successfully")))
}
