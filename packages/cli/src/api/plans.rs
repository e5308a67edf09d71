// ABOUTME: Pricing plan listing for the marketing site
// ABOUTME: Public endpoint returning every plan with its display name and price

use axum::Json;
use serde::Serialize;

use voxdesk_core::Plan;

use super::ApiResponse;

#[derive(Debug, Serialize)]
pub struct PlanInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub monthly_price: &'static str,
}

impl From<Plan> for PlanInfo {
    fn from(plan: Plan) -> Self {
        Self {
            key: plan.key(),
            name: plan.display_name(),
            monthly_price: plan.monthly_price(),
        }
    }
}

pub async fn list_plans() -> Json<ApiResponse<Vec<PlanInfo>>> {
    Json(ApiResponse::success(
        Plan::ALL.into_iter().map(PlanInfo::from).collect(),
    ))
}
