mod access_token;
mod user;

pub use access_token::*;
pub use user::*;
