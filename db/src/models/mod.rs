pub mod announcement;
pub mod attendance_entry;
pub mod attendance_sheet;
pub mod class;
pub mod class_enrollment;
pub mod library_file;
pub mod library_folder;
pub mod password_reset_token;
pub mod payment;
pub mod user;

pub use announcement::Entity as Announcement;
pub use attendance_entry::Entity as AttendanceEntry;
pub use attendance_sheet::Entity as AttendanceSheet;
pub use class::Entity as Class;
pub use class_enrollment::Entity as ClassEnrollment;
pub use library_file::Entity as LibraryFile;
pub use library_folder::Entity as LibraryFolder;
pub use password_reset_token::Entity as PasswordResetToken;
pub use payment::Entity as Payment;
pub use user::Entity as User;
