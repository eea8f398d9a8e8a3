pub mod login_request;
pub mod register_user_request;
pub mod session_response;
pub mod user_dto;
pub mod user_response;
pub mod users;
pub mod wx_login_request;
