pub mod controller_handler;
pub mod dispatcher;

pub use controller_handler::Controller;
pub use dispatcher::Dispatcher;
