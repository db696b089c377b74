mod admin_test;
mod student_view_test;
mod submit_test;
