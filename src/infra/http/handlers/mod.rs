pub mod dashboard;
pub mod health;
pub mod settings;
pub mod steps;
pub mod users;
pub mod workouts;
