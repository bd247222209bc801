pub mod chromium_driver;
pub mod js_executor;
pub mod page_driver;
pub mod waiter;

pub use chromium_driver::ChromiumDriver;
pub use js_executor::JsExecutor;
pub use page_driver::{PageDriver, StoredCookie};
pub use waiter::wait_for_element;
