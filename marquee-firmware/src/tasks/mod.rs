//! Embassy tasks

mod link_rx;
mod link_tx;

pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;
