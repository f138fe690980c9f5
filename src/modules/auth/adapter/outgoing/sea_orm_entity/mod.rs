pub mod login_histories;
pub mod users;
