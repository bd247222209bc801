pub mod connection;
pub mod launch;
pub mod session;

pub use connection::connect_to_browser_and_page;
pub use launch::launch_browser;
pub use session::BrowserSession;
