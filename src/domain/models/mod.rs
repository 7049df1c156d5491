mod assessment;
mod backend;
mod fault;
mod prompt;
mod session;
mod slash_commands;

pub use assessment::*;
pub use backend::*;
pub use fault::*;
pub use prompt::*;
pub use session::*;
pub use slash_commands::*;
