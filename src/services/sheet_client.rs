//! Client for the spreadsheet-backed system of record (Apps Script web
//! endpoint).
//!
//! One base URL serves every table: `GET ?type=<table>` returns an array
//! of rows keyed by UPPERCASE column names, `POST ?type=<table>` appends a
//! row and answers `{status, id}`. Calls are fire-and-forget per user
//! action: no retry, no backoff; a failure surfaces as an error and leaves
//! prior state untouched.

use crate::error::AppError;
use crate::models::{Payee, Sector, TripRecord, User, UserStatus};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

pub struct SheetClient {
    endpoint_url: String,
    client: reqwest::Client,
}

impl SheetClient {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint_url: endpoint_url.into(),
            client,
        }
    }

    /// Users, most recent first. Rows missing both email and first name
    /// are dropped (blank sheet lines).
    pub async fn fetch_users(&self) -> Result<Vec<User>, AppError> {
        let rows: Vec<UserRow> = self.fetch_rows("users").await?;
        let mut users: Vec<User> = rows
            .into_iter()
            .map(UserRow::into_user)
            .filter(|u| !u.email.is_empty() || !u.first_name.is_empty())
            .collect();
        users.reverse();
        Ok(users)
    }

    pub async fn create_user(&self, input: &NewUser) -> Result<String, AppError> {
        let body = serde_json::json!({
            "firstName": input.first_name,
            "lastName": input.last_name,
            "email": input.email,
            "password": input.password,
            "sector": input.sector.sheet_value(),
            "status": UserStatus::Active.sheet_value(),
            "type": "users",
        });
        self.append_row("users", &body).await
    }

    /// Payees, most recent first.
    pub async fn fetch_payees(&self) -> Result<Vec<Payee>, AppError> {
        let rows: Vec<PayeeRow> = self.fetch_rows("payees").await?;
        let mut payees: Vec<Payee> = rows
            .into_iter()
            .map(PayeeRow::into_payee)
            .filter(|p| !p.name.is_empty())
            .collect();
        payees.reverse();
        Ok(payees)
    }

    pub async fn create_payee(&self, input: &NewPayee) -> Result<String, AppError> {
        let body = serde_json::json!({
            "name": input.name,
            "document": input.document,
            "pixKey": input.pix_key,
            "plate": input.vehicle_plate,
            "type": "payees",
        });
        self.append_row("payees", &body).await
    }

    /// Freight trips in original sheet order. The engine's `first
    /// reference` rule depends on this order being preserved.
    pub async fn fetch_trips(&self) -> Result<Vec<TripRecord>, AppError> {
        let rows: Vec<TripRow> = self.fetch_rows("freights").await?;
        Ok(rows
            .into_iter()
            .map(TripRow::into_trip)
            .filter(|t| !t.vehicle_plate.is_empty())
            .collect())
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, AppError> {
        // nocache defeats intermediary caching of the Apps Script response.
        let url = format!(
            "{}?type={}&nocache={}",
            self.endpoint_url,
            table,
            Utc::now().timestamp_millis()
        );

        tracing::debug!(table = table, "Fetching rows from sheet endpoint");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::BadGateway(format!(
                "sheet endpoint returned {} for table '{}'",
                response.status(),
                table
            )));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::BadGateway(format!("malformed sheet response: {}", e)))
    }

    async fn append_row(&self, table: &str, body: &Value) -> Result<String, AppError> {
        let url = format!("{}?type={}", self.endpoint_url, table);

        let response = self.client.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(AppError::BadGateway(format!(
                "sheet endpoint returned {} for table '{}'",
                response.status(),
                table
            )));
        }

        let saved: SaveResponse = response
            .json()
            .await
            .map_err(|e| AppError::BadGateway(format!("malformed sheet response: {}", e)))?;

        if saved.status != "success" {
            return Err(AppError::BadGateway(
                saved
                    .message
                    .unwrap_or_else(|| "unknown error saving to sheet".to_string()),
            ));
        }

        tracing::info!(table = table, "Row appended to sheet");

        Ok(value_to_string(&saved.id).unwrap_or_else(|| Uuid::new_v4().to_string()))
    }
}

pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub sector: Sector,
}

pub struct NewPayee {
    pub name: String,
    pub document: String,
    pub pix_key: String,
    pub vehicle_plate: String,
}

// ----------------------------------------------------------------------------
// Wire rows. The Apps Script returns UPPERCASE column keys, numbers for
// numeric cells, and RFC 3339 timestamps for dates.
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SaveResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    id: Value,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(rename = "ID", default)]
    id: Value,
    #[serde(rename = "NOME", default)]
    first_name: String,
    #[serde(rename = "SOBRENOME", default)]
    last_name: String,
    #[serde(rename = "EMAIL", default)]
    email: String,
    #[serde(rename = "SENHA", default)]
    password: Value,
    #[serde(rename = "SETOR", default)]
    sector: String,
    #[serde(rename = "STATUS", default)]
    status: String,
    #[serde(rename = "DATA_CRIACAO", default)]
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: value_to_string(&self.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: value_to_string(&self.password).unwrap_or_default(),
            sector: Sector::from_sheet_value(&self.sector),
            status: UserStatus::from_sheet_value(&self.status),
            created_at: parse_sheet_date(&self.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PayeeRow {
    #[serde(rename = "ID", default)]
    id: Value,
    #[serde(rename = "NOME", default)]
    name: String,
    #[serde(rename = "DOCUMENTO", default)]
    document: Value,
    #[serde(rename = "CHAVE_PIX", default)]
    pix_key: Value,
    #[serde(rename = "PLACA", default)]
    vehicle_plate: String,
    #[serde(rename = "DATA_CRIACAO", default)]
    created_at: String,
}

impl PayeeRow {
    fn into_payee(self) -> Payee {
        Payee {
            id: value_to_string(&self.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: self.name.trim().to_string(),
            document: value_to_string(&self.document).unwrap_or_default(),
            pix_key: value_to_string(&self.pix_key).unwrap_or_default(),
            vehicle_plate: self.vehicle_plate.trim().to_string(),
            created_at: parse_sheet_date(&self.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TripRow {
    #[serde(rename = "ID", default)]
    id: Value,
    #[serde(rename = "REFERENCIA", default)]
    reference: String,
    #[serde(rename = "DATA", default)]
    operation_date: String,
    #[serde(rename = "PLACA", default)]
    vehicle_plate: String,
    #[serde(rename = "TIPO_SERVICO", default)]
    service_type: String,
    #[serde(rename = "ORIGEM", default)]
    origin_terminal: String,
    #[serde(rename = "DESTINO", default)]
    destination_terminal: String,
    #[serde(rename = "CONTAINER", default)]
    container_id: Value,
    #[serde(rename = "VALOR", default)]
    gross_value: Value,
}

impl TripRow {
    fn into_trip(self) -> TripRecord {
        TripRecord {
            id: value_to_string(&self.id).unwrap_or_else(|| Uuid::new_v4().to_string()),
            reference: self.reference.trim().to_string(),
            operation_date: parse_sheet_date(&self.operation_date),
            vehicle_plate: self.vehicle_plate.trim().to_string(),
            service_type: self.service_type.trim().to_string(),
            origin_terminal: self.origin_terminal.trim().to_string(),
            destination_terminal: self.destination_terminal.trim().to_string(),
            container_id: value_to_string(&self.container_id).filter(|c| c != "N/A"),
            gross_value: parse_sheet_decimal(&self.gross_value),
        }
    }
}

/// Sheet cells may come back as strings or numbers depending on column
/// formatting.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_sheet_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(Decimal::from_f64_retain)
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => {
            let raw = s.trim();
            // Brazilian formatting uses '.' for thousands and ',' for the
            // decimal separator.
            let normalized = if raw.contains(',') {
                raw.replace('.', "").replace(',', ".")
            } else {
                raw.to_string()
            };
            normalized.parse().unwrap_or_else(|_| {
                tracing::warn!(cell = raw, "Unparseable monetary cell, treating as zero");
                Decimal::ZERO
            })
        }
        _ => Decimal::ZERO,
    }
}

fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_row_maps_uppercase_keys() {
        let row: UserRow = serde_json::from_value(serde_json::json!({
            "ID": 7,
            "NOME": " Ana ",
            "SOBRENOME": "Souza",
            "EMAIL": "ana@empresa.com",
            "SENHA": 123456,
            "SETOR": "Operação",
            "STATUS": "Inativo",
            "DATA_CRIACAO": "2026-03-14T03:00:00.000Z"
        }))
        .unwrap();

        let user = row.into_user();
        assert_eq!(user.id, "7");
        assert_eq!(user.first_name, "Ana");
        assert_eq!(user.password, "123456");
        assert_eq!(user.sector, Sector::Operations);
        assert_eq!(user.status, UserStatus::Inactive);
        assert_eq!(
            user.created_at,
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn trip_row_parses_numeric_value_and_na_container() {
        let row: TripRow = serde_json::from_value(serde_json::json!({
            "ID": "t-1",
            "REFERENCIA": "FR-0001",
            "DATA": "2026-02-01",
            "PLACA": "GQI9J96",
            "TIPO_SERVICO": "Importação",
            "ORIGEM": "Porto de Santos",
            "DESTINO": "CLIA Campinas",
            "CONTAINER": "N/A",
            "VALOR": 600.0
        }))
        .unwrap();

        let trip = row.into_trip();
        assert_eq!(trip.gross_value, Decimal::from(600));
        assert_eq!(trip.container_id, None);
        assert_eq!(trip.operation_date, NaiveDate::from_ymd_opt(2026, 2, 1));
    }

    #[test]
    fn blank_cells_fall_back_to_defaults() {
        let row: UserRow = serde_json::from_value(serde_json::json!({
            "EMAIL": "x@y.com"
        }))
        .unwrap();

        let user = row.into_user();
        assert!(!user.id.is_empty());
        assert_eq!(user.sector, Sector::Finance);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.created_at, None);
    }

    #[test]
    fn decimal_cells_accept_comma_strings() {
        assert_eq!(
            parse_sheet_decimal(&serde_json::json!("1450,50")),
            "1450.50".parse::<Decimal>().unwrap()
        );
        assert_eq!(parse_sheet_decimal(&Value::Null), Decimal::ZERO);
    }

    #[test]
    fn decimal_cells_accept_thousands_separators() {
        assert_eq!(
            parse_sheet_decimal(&serde_json::json!("1.450,50")),
            "1450.50".parse::<Decimal>().unwrap()
        );
        assert_eq!(
            parse_sheet_decimal(&serde_json::json!("12.345.678,90")),
            "12345678.90".parse::<Decimal>().unwrap()
        );
        assert_eq!(parse_sheet_decimal(&serde_json::json!("abc")), Decimal::ZERO);
    }
}
