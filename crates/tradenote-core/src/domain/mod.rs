//! 매매일지 도메인 모델.

mod clock;
mod replication;
mod session;
mod trade;
mod window;

pub use clock::*;
pub use replication::*;
pub use session::*;
pub use trade::*;
pub use window::*;
