//! Port adapters for the network, the clock and navigation.

mod history_navigator;
mod reqwest_transport;
mod system_clock;

pub use history_navigator::HistoryNavigator;
pub use reqwest_transport::ReqwestTransport;
pub use system_clock::SystemClock;
