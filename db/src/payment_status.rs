//! Monthly payment-status derivation.
//!
//! For a student and class, each month's liability is derived on every read
//! from attendance counts, the fee/exemption configuration and any submitted
//! payment. Nothing here is stored for months without a payment row.

use chrono::{Datelike, Utc};
use sea_orm::{DatabaseConnection, DbErr};

use crate::models::{
    attendance_sheet::{self, MonthAttendance},
    class,
    class_enrollment,
    payment,
};

/// A student becomes liable for a month's fee once they were present for at
/// least this many sessions. Fewer marks mean grace for late enrollment or
/// withdrawal.
pub const MIN_LIABLE_PRESENT_DAYS: i64 = 2;

/// Derived status of one calendar month for one student in one class.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MonthStatus {
    pub month: u32,
    pub attendance: MonthAttendance,
    pub free_class: bool,
    pub monthly_fee: i64,
    pub payment: Option<payment::Model>,
    pub requires_payment: bool,
    pub overdue: bool,
}

/// Combines the inputs for one month. Pure; `today` is the current
/// (year, month) pair so the overdue horizon is testable.
///
/// `overdue` only fires for months strictly before `today` — the current
/// month is never overdue even when unpaid.
pub fn month_status(
    year: i32,
    month: u32,
    attendance: MonthAttendance,
    free_class: bool,
    monthly_fee: i64,
    payment: Option<payment::Model>,
    today: (i32, u32),
) -> MonthStatus {
    let requires_payment = attendance.present_days >= MIN_LIABLE_PRESENT_DAYS && !free_class;
    let overdue = requires_payment && payment.is_none() && (year, month) < today;

    MonthStatus {
        month,
        attendance,
        free_class,
        monthly_fee,
        payment,
        requires_payment,
        overdue,
    }
}

/// Whether the student's membership in this class is fee-exempt, either
/// through the class-wide flag or their own enrollment.
async fn is_free_for_student(
    db: &DatabaseConnection,
    class: &class::Model,
    student_id: i64,
) -> Result<bool, DbErr> {
    if class.free_class {
        return Ok(true);
    }
    let enrollment = class_enrollment::Model::find(db, class.id, student_id).await?;
    Ok(enrollment.map(|e| e.fee_exempt).unwrap_or(false))
}

/// Derives the status of a single month for one student.
pub async fn student_month_status(
    db: &DatabaseConnection,
    class: &class::Model,
    student_id: i64,
    year: i32,
    month: u32,
) -> Result<MonthStatus, DbErr> {
    let free_class = is_free_for_student(db, class, student_id).await?;
    let attendance =
        attendance_sheet::Model::month_attendance(db, class.id, student_id, year, month).await?;
    let paid =
        payment::Model::find_for_month(db, student_id, class.id, year, month as i32).await?;

    let now = Utc::now();
    Ok(month_status(
        year,
        month,
        attendance,
        free_class,
        class.monthly_fee,
        paid,
        (now.year(), now.month()),
    ))
}

/// Derives all 12 months of the given year for one student.
pub async fn year_statuses(
    db: &DatabaseConnection,
    class: &class::Model,
    student_id: i64,
    year: i32,
) -> Result<Vec<MonthStatus>, DbErr> {
    let free_class = is_free_for_student(db, class, student_id).await?;
    let now = Utc::now();
    let today = (now.year(), now.month());

    let mut statuses = Vec::with_capacity(12);
    for month in 1..=12u32 {
        let attendance =
            attendance_sheet::Model::month_attendance(db, class.id, student_id, year, month)
                .await?;
        let paid =
            payment::Model::find_for_month(db, student_id, class.id, year, month as i32).await?;
        statuses.push(month_status(
            year,
            month,
            attendance,
            free_class,
            class.monthly_fee,
            paid,
            today,
        ));
    }
    Ok(statuses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{attendance_entry::AttendanceStatus, user};
    use crate::test_utils::setup_test_db;
    use chrono::TimeZone;
    use sea_orm::{ActiveModelTrait, Set};

    fn attendance(present: i64, total: i64) -> MonthAttendance {
        MonthAttendance {
            present_days: present,
            total_class_days: total,
        }
    }

    #[test]
    fn below_threshold_never_requires_payment() {
        for free in [false, true] {
            let status = month_status(2025, 3, attendance(1, 4), free, 2000, None, (2025, 6));
            assert!(!status.requires_payment);
            assert!(!status.overdue);
        }
    }

    #[test]
    fn free_class_never_requires_payment() {
        let status = month_status(2025, 3, attendance(4, 4), true, 2000, None, (2025, 6));
        assert!(!status.requires_payment);
        assert!(!status.overdue);
    }

    #[test]
    fn liable_month_requires_payment() {
        let status = month_status(2025, 3, attendance(2, 3), false, 2000, None, (2025, 6));
        assert!(status.requires_payment);
    }

    #[test]
    fn overdue_only_for_past_months() {
        // Past month, unpaid and liable.
        let past = month_status(2025, 3, attendance(3, 3), false, 2000, None, (2025, 4));
        assert!(past.overdue);

        // Current month is never overdue.
        let current = month_status(2025, 4, attendance(3, 3), false, 2000, None, (2025, 4));
        assert!(!current.overdue);

        // Future months are never overdue.
        let future = month_status(2025, 5, attendance(3, 3), false, 2000, None, (2025, 4));
        assert!(!future.overdue);

        // Previous year is overdue even for a "later" month number.
        let last_year = month_status(2024, 11, attendance(3, 3), false, 2000, None, (2025, 4));
        assert!(last_year.overdue);
    }

    #[test]
    fn submitted_payment_clears_overdue() {
        let paid = payment::Model {
            id: 1,
            student_id: 1,
            class_id: 1,
            year: 2025,
            month: 3,
            amount: 2000,
            receipt_reference: "rcpt-1".into(),
            note: None,
            status: payment::PaymentStatus::Pending,
            present_days: 3,
            total_class_days: 3,
            action_by: None,
            action_date: None,
            action_note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let status =
            month_status(2025, 3, attendance(3, 3), false, 2000, Some(paid), (2025, 6));
        assert!(status.requires_payment);
        assert!(!status.overdue);
    }

    #[tokio::test]
    async fn no_sheets_yields_zero_counts() {
        let db = setup_test_db().await;
        let class = class::Model::create(&db, "Grade 10 Maths", "10", "maths", 2000, false)
            .await
            .unwrap();
        let student =
            user::Model::create(&db, "student", "student@test.com", "password", false, true)
                .await
                .unwrap();
        class_enrollment::Model::enroll(&db, class.id, student.id, false, false)
            .await
            .unwrap();

        let counts =
            attendance_sheet::Model::month_attendance(&db, class.id, student.id, 2025, 3)
                .await
                .unwrap();
        assert_eq!(counts, attendance(0, 0));
    }

    #[tokio::test]
    async fn sheet_without_entry_counts_as_absent() {
        let db = setup_test_db().await;
        let staff = user::Model::create(&db, "staff2", "staff2@test.com", "password", true, true)
            .await
            .unwrap();
        let class = class::Model::create(&db, "Grade 11 Science", "11", "science", 2500, false)
            .await
            .unwrap();
        let student =
            user::Model::create(&db, "student2", "student2@test.com", "password", false, true)
                .await
                .unwrap();
        class_enrollment::Model::enroll(&db, class.id, student.id, false, false)
            .await
            .unwrap();

        let dates = [
            Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap(),
        ];
        let mut sheets = Vec::new();
        for date in dates {
            sheets.push(
                attendance_sheet::Model::create(&db, class.id, staff.id, date)
                    .await
                    .unwrap(),
            );
        }

        // Present on the first two sessions; no entry at all on the third.
        for sheet in &sheets[..2] {
            crate::models::attendance_entry::ActiveModel {
                sheet_id: Set(sheet.id),
                student_id: Set(student.id),
                status: Set(AttendanceStatus::Present),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let counts =
            attendance_sheet::Model::month_attendance(&db, class.id, student.id, 2025, 3)
                .await
                .unwrap();
        assert_eq!(counts, attendance(2, 3));

        // Sessions in an adjacent month are out of the window.
        let april = attendance_sheet::Model::month_attendance(&db, class.id, student.id, 2025, 4)
            .await
            .unwrap();
        assert_eq!(april, attendance(0, 0));
    }
}
