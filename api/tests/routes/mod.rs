mod auth;
mod classes;
mod payments;
