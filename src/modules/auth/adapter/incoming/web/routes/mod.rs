mod login_user;
mod logout_user;
mod refresh_token;
mod register_user;
mod signin_history;
mod user_status;
mod verify_email;

pub use login_user::*;
pub use logout_user::*;
pub use refresh_token::*;
pub use register_user::*;
pub use signin_history::*;
pub use user_status::*;
pub use verify_email::*;
