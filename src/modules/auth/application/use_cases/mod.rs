pub mod create_user;
pub mod login_user;
pub mod logout_user;
pub mod refresh_token;
pub mod set_user_status;
pub mod signin_history;
pub mod verify_user_email;
