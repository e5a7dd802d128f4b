pub mod error;
pub mod model;
pub mod projection;

pub use error::DataError;
pub use model::{status, NewOrder, Order, OrderItem, User};
pub use projection::{OrderBillComparison, OrderDaily, OrderInfo, OrderStatistics, OrderUserDetail};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{DataError, NewOrder, Order, OrderItem};
}
