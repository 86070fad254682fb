use serde::Serialize;

#[derive(Serialize)]
pub struct TenantCreatedResponse {
    pub tenant_id: String,
    pub slug: String,
    pub admin_id: String,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<String>,
}
