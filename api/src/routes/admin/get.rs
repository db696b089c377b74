use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use std::str::FromStr;
use util::state::AppState;

use crate::routes::payments::common::{PaymentDto, populate_payments};
use crate::response::ApiResponse;
use db::models::payment::{Column as PaymentCol, Entity as PaymentEntity, PaymentStatus};
use db::models::user::{Column as UserCol, Entity as UserEntity};

#[derive(serde::Deserialize)]
pub struct ListQuery {
    /// Filter by status; both historical spellings are accepted.
    pub status: Option<String>,
    pub class_id: Option<i64>,
    pub year: Option<i32>,
    pub month: Option<i32>,
    /// Fuzzy match on the submitting student's username.
    pub q: Option<String>,
    /// Sort by: `created_at` | `amount` | `status` (prefix `-` for desc).
    pub sort: Option<String>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(serde::Serialize, Default)]
pub struct ListResponse {
    pub payment_requests: Vec<PaymentDto>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}

/// GET `/api/admin/all-payment-requests`
///
/// Paginated, filterable list of payment requests across all classes. Staff
/// only (router layer).
pub async fn list_payment_requests(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> (StatusCode, Json<ApiResponse<ListResponse>>) {
    let db = state.db();
    let page = q.page.unwrap_or(1).max(1) as u64;
    let per_page = q.per_page.unwrap_or(20).clamp(1, 100) as u64;

    let mut sel = PaymentEntity::find();
    if let Some(raw) = q.status.as_ref() {
        match PaymentStatus::from_str(raw) {
            Ok(status) => sel = sel.filter(PaymentCol::Status.eq(status)),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown status '{raw}'"))),
                );
            }
        }
    }
    if let Some(class_id) = q.class_id {
        sel = sel.filter(PaymentCol::ClassId.eq(class_id));
    }
    if let Some(year) = q.year {
        sel = sel.filter(PaymentCol::Year.eq(year));
    }
    if let Some(month) = q.month {
        sel = sel.filter(PaymentCol::Month.eq(month));
    }
    if let Some(s) = q.q.as_ref().filter(|s| !s.trim().is_empty()) {
        // Username contains → resolve ids, then filter payments.
        let ids: Vec<i64> = UserEntity::find()
            .filter(UserCol::Username.contains(s))
            .all(db)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|u| u.id)
            .collect();
        sel = sel.filter(PaymentCol::StudentId.is_in(ids));
    }
    sel = match q.sort.as_deref() {
        Some(sort) if sort.starts_with('-') => match &sort[1..] {
            "amount" => sel.order_by_desc(PaymentCol::Amount),
            "status" => sel.order_by_desc(PaymentCol::Status),
            _ => sel.order_by_desc(PaymentCol::CreatedAt),
        },
        Some("amount") => sel.order_by_asc(PaymentCol::Amount),
        Some("status") => sel.order_by_asc(PaymentCol::Status),
        Some("created_at") => sel.order_by_asc(PaymentCol::CreatedAt),
        _ => sel.order_by_desc(PaymentCol::CreatedAt),
    };

    let paginator = sel.paginate(db, per_page);
    let total = paginator.num_items().await.unwrap_or(0) as i32;
    let rows = paginator
        .fetch_page(page.saturating_sub(1))
        .await
        .unwrap_or_default();

    let payment_requests = match populate_payments(db, rows).await {
        Ok(dtos) => dtos,
        Err(e) => {
            tracing::error!(error = %e, "Failed to populate payment requests");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Database error")),
            );
        }
    };

    let resp = ListResponse {
        payment_requests,
        page: page as i32,
        per_page: per_page as i32,
        total,
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(resp, "Payment requests retrieved")),
    )
}
