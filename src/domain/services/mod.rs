mod dispatcher;
mod flow;

pub use dispatcher::*;
pub use flow::*;
