pub mod cancel_order;
pub mod create_order;
pub mod fill_order;

pub use cancel_order::*;
pub use create_order::*;
pub use fill_order::*;
