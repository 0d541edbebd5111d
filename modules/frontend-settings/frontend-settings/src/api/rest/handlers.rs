use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::Json;
use frontend_settings_sdk::{SettingsDocument, SettingsUpdate};
use serde_json::Value;

use crate::domain::service::Service;

use super::dto::{ArchiveRequest, ArchivedTestsDto, LockQuery, LockStatusDto, SavedDto};
use super::error::ApiResult;
use super::extract::{Editor, Settings};

pub async fn get_document(
    Editor(ctx): Editor,
    Settings(settings_type): Settings,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<SettingsDocument<Value>>> {
    let doc = svc.get_document(&ctx, settings_type).await?;
    Ok(Json(doc))
}

pub async fn save_document(
    Editor(ctx): Editor,
    Settings(settings_type): Settings,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<SettingsUpdate<Value>>,
) -> ApiResult<Json<SavedDto>> {
    let version = svc.save(&ctx, settings_type, req).await?;
    Ok(Json(SavedDto { version }))
}

pub async fn lock(
    Editor(ctx): Editor,
    Settings(settings_type): Settings,
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<LockQuery>,
) -> ApiResult<Json<LockStatusDto>> {
    let lock_status = if query.force {
        svc.take_control(&ctx, settings_type).await?
    } else {
        svc.lock(&ctx, settings_type).await?
    };
    Ok(Json(LockStatusDto { lock_status }))
}

pub async fn unlock(
    Editor(ctx): Editor,
    Settings(settings_type): Settings,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<LockStatusDto>> {
    let lock_status = svc.unlock(&ctx, settings_type).await?;
    Ok(Json(LockStatusDto { lock_status }))
}

pub async fn archive_tests(
    Editor(ctx): Editor,
    Settings(settings_type): Settings,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<ArchiveRequest>,
) -> ApiResult<Json<ArchivedTestsDto>> {
    let tests = req.tests;
    svc.archive(&ctx, settings_type, tests.clone()).await?;
    Ok(Json(ArchivedTestsDto { tests }))
}

pub async fn list_archived(
    Editor(_ctx): Editor,
    Settings(settings_type): Settings,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<ArchivedTestsDto>> {
    let tests = svc.list_archived(settings_type).await?;
    Ok(Json(ArchivedTestsDto { tests }))
}
