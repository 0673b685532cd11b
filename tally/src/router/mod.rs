pub mod duration;
pub mod ledger;
pub mod locks;
pub mod notify;
pub mod panel;
pub mod resolve;
pub mod visit;
