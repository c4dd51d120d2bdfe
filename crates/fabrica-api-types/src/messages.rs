use serde::Serialize;

/// Request body for `POST /contact`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

/// Request body for `POST /production-line/send-email`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLineInquiry {
    pub full_name: String,
    pub company_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub message: String,
    pub production_line_name: String,
    pub container_type: String,
    pub capacity: String,
}
