//! The emission record detail view: fetch-for-edit plus the
//! insert/update/delete mutation endpoint.

use crate::form::EmissionForm;
use crate::response::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use seaboard_database::{self as db, EmissionRecord};
use seaboard_error::{StoreError, StoreErrorKind, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// Query-string parameters of the detail view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailParams {
    /// One-time insert confirmation set by the post-insert redirect
    pub inserted: Option<String>,
}

/// Display-ready context for the detail form.
#[derive(Debug, Clone, Serialize)]
pub struct DetailContext {
    pub nbar: &'static str,
    /// True when the form edits an existing record (key immutable)
    pub is_update: bool,
    pub imo: Option<i64>,
    /// Stored record backing the form on GET
    pub record: Option<EmissionRecord>,
    /// Submitted raw input, echoed back so a rejected form re-renders
    pub form: Option<EmissionForm>,
    /// Field name mapped to a validation message
    pub errors: BTreeMap<String, String>,
    pub msg: Option<String>,
    pub success: bool,
}

impl DetailContext {
    fn blank() -> Self {
        Self {
            nbar: "emissions",
            is_update: false,
            imo: None,
            record: None,
            form: None,
            errors: BTreeMap::new(),
            msg: None,
            success: false,
        }
    }
}

/// Fetch one record for editing, or a blank insert form when no key is
/// given. An unknown key on direct lookup is a 404.
#[instrument(skip(state, params))]
pub async fn detail(
    State(state): State<AppState>,
    imo: Option<Path<i64>>,
    Query(params): Query<DetailParams>,
) -> Result<Json<DetailContext>, ApiError> {
    let imo = imo.map(|Path(key)| key);

    let record = match imo {
        Some(key) => {
            let mut conn = state.conn()?;
            match db::get_by_key(&mut conn, key)? {
                Some(record) => Some(record),
                None => return Err(ApiError(StoreError::new(StoreErrorKind::NotFound))),
            }
        }
        None => None,
    };

    let msg = match (params.inserted.as_deref(), imo) {
        (Some("true"), Some(key)) => Some(format!("✔ IMO {key} inserted")),
        _ => None,
    };

    Ok(Json(DetailContext {
        is_update: imo.is_some(),
        imo,
        record,
        success: msg.is_some(),
        msg,
        ..DetailContext::blank()
    }))
}

/// Dispatch a mutation according to the form's `action` field.
///
/// Successful inserts and deletes redirect (to the detail view with a
/// one-time `inserted` flag, and to the listing with a one-time `deleted`
/// flag, respectively). Every failure re-renders the form context with a
/// message and `success = false`; store-level surprises become a generic
/// message rather than a failed request.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    imo: Option<Path<i64>>,
    Form(form): Form<EmissionForm>,
) -> Result<Response, ApiError> {
    let path_imo = imo.map(|Path(key)| key);
    let form = form.normalized();

    match form.action.as_deref() {
        Some("delete") => delete_record(&state, path_imo, form),
        Some("insert") => insert_record(&state, path_imo, form),
        Some("update") => update_record(&state, path_imo, form),
        _ => {
            let mut errors = BTreeMap::new();
            errors.insert(
                "action".to_string(),
                "Action must be insert, update, or delete".to_string(),
            );
            Ok(rejected(path_imo, form, errors, "There were errors in your form").into_response())
        }
    }
}

fn insert_record(
    state: &AppState,
    path_imo: Option<i64>,
    form: EmissionForm,
) -> Result<Response, ApiError> {
    let record = match form.validate(path_imo) {
        Ok(record) => record,
        Err(err) => return Ok(validation_rejected(path_imo, form, err).into_response()),
    };

    let mut conn = state.conn()?;
    match db::insert(&mut conn, &record) {
        Ok(()) => Ok(Redirect::to(&format!("/emissions/imo/{}?inserted=true", record.imo))
            .into_response()),
        Err(err) if err.is_conflict() => {
            Ok(rejected(path_imo, form, BTreeMap::new(), "IMO already exists").into_response())
        }
        Err(err) => Ok(store_rejected(path_imo, form, err).into_response()),
    }
}

fn update_record(
    state: &AppState,
    path_imo: Option<i64>,
    form: EmissionForm,
) -> Result<Response, ApiError> {
    let record = match form.validate(path_imo) {
        Ok(record) => record,
        Err(err) => return Ok(validation_rejected(path_imo, form, err).into_response()),
    };

    let mut conn = state.conn()?;
    match db::update(&mut conn, &record) {
        Ok(()) => {
            let context = DetailContext {
                is_update: true,
                imo: Some(record.imo),
                record: Some(record),
                msg: Some("✔ IMO updated successfully".to_string()),
                success: true,
                ..DetailContext::blank()
            };
            Ok(Json(context).into_response())
        }
        Err(err) if err.is_not_found() => Ok(rejected(
            path_imo,
            form,
            BTreeMap::new(),
            &format!("IMO {} not found", record.imo),
        )
        .into_response()),
        Err(err) => Ok(store_rejected(path_imo, form, err).into_response()),
    }
}

fn delete_record(
    state: &AppState,
    path_imo: Option<i64>,
    form: EmissionForm,
) -> Result<Response, ApiError> {
    let imo = match path_imo.or_else(|| form.imo.as_deref().and_then(|raw| raw.parse().ok())) {
        Some(imo) => imo,
        None => {
            let mut errors = BTreeMap::new();
            errors.insert("imo".to_string(), "IMO number is required".to_string());
            return Ok(
                rejected(None, form, errors, "There were errors in your form").into_response()
            );
        }
    };

    let mut conn = state.conn()?;
    match db::delete(&mut conn, imo) {
        Ok(()) => Ok(Redirect::to(&format!("/emissions?deleted={imo}")).into_response()),
        Err(err) => Ok(store_rejected(Some(imo), form, err).into_response()),
    }
}

fn validation_rejected(
    path_imo: Option<i64>,
    form: EmissionForm,
    err: ValidationError,
) -> Json<DetailContext> {
    rejected(path_imo, form, err.fields, "There were errors in your form")
}

fn store_rejected(path_imo: Option<i64>, form: EmissionForm, err: StoreError) -> Json<DetailContext> {
    tracing::error!(error = %err, "Mutation failed at the store");
    rejected(
        path_imo,
        form,
        BTreeMap::new(),
        &format!("Some unhandled error occurred: {}", err.kind),
    )
}

fn rejected(
    path_imo: Option<i64>,
    form: EmissionForm,
    errors: BTreeMap<String, String>,
    msg: &str,
) -> Json<DetailContext> {
    Json(DetailContext {
        is_update: path_imo.is_some(),
        imo: path_imo,
        form: Some(form),
        errors,
        msg: Some(msg.to_string()),
        success: false,
        ..DetailContext::blank()
    })
}
