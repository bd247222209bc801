pub mod connectivity;
pub mod group_discovery;
pub mod ledger;
pub mod poll_composer;
pub mod session_store;

pub use connectivity::{ConnectivityGuard, HttpProbe, ReachabilityProbe};
pub use group_discovery::{merge_group_lists, GroupDiscovery, GroupSource, Harvest};
pub use ledger::Ledger;
pub use poll_composer::PollComposer;
pub use session_store::SessionStore;
