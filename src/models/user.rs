//! Back-office user accounts, backed by the `users` sheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Finance,
    Operations,
}

impl Sector {
    /// Column value the spreadsheet uses for this sector.
    pub fn sheet_value(&self) -> &'static str {
        match self {
            Sector::Finance => "Financeiro",
            Sector::Operations => "Operação",
        }
    }

    /// Parse the spreadsheet column value; unknown values default to
    /// Finance.
    pub fn from_sheet_value(raw: &str) -> Self {
        match raw.trim() {
            "Operação" | "Operacao" => Sector::Operations,
            _ => Sector::Finance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn sheet_value(&self) -> &'static str {
        match self {
            UserStatus::Active => "Ativo",
            UserStatus::Inactive => "Inativo",
        }
    }

    pub fn from_sheet_value(raw: &str) -> Self {
        match raw.trim() {
            "Inativo" => UserStatus::Inactive,
            _ => UserStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Kept for credential verification against the sheet; never sent back
    /// to callers.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub sector: Sector,
    pub status: UserStatus,
    pub created_at: Option<NaiveDate>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}
