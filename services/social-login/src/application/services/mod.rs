mod code_exchanger;
mod login_flow;
mod token_converter;
mod user_resolver;

pub use code_exchanger::*;
pub use login_flow::*;
pub use token_converter::*;
pub use user_resolver::*;
