pub mod types;
pub mod cipher;
pub mod counter;
pub mod session;
pub mod oracle;

pub use types::*;
pub use cipher::*;
pub use counter::*;
pub use session::*;
pub use oracle::*;
