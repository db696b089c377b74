pub mod m202601150001_create_users;
pub mod m202601150002_create_classes;
pub mod m202601150003_create_class_enrollments;
pub mod m202601150004_create_attendance;
pub mod m202601150005_create_payments;
pub mod m202601150006_create_password_reset_tokens;
pub mod m202601150007_create_announcements;
pub mod m202601150008_create_library;
