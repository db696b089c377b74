//! DTOs shared by the attendance route group.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use db::models::attendance_entry::AttendanceStatus;
use db::models::attendance_sheet::Model as SheetModel;

#[derive(Debug, Deserialize)]
pub struct SheetRequest {
    pub session_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct EntryInput {
    pub student_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize)]
pub struct EntriesRequest {
    pub entries: Vec<EntryInput>,
}

#[derive(Debug, Serialize, Default)]
pub struct SheetDto {
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub session_date: String,
    pub finalized: bool,
    pub created_at: String,
}

impl From<SheetModel> for SheetDto {
    fn from(sheet: SheetModel) -> Self {
        Self {
            id: sheet.id,
            class_id: sheet.class_id,
            created_by: sheet.created_by,
            session_date: sheet
                .session_date
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            finalized: sheet.finalized,
            created_at: sheet.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
