pub mod hall;
pub mod seat;
pub mod schedule;
pub mod order;

pub use hall::{Hall, HallType};
pub use seat::{Seat, SeatStatus, SeatType, TemplateSeatType};
pub use schedule::{Movie, Schedule, ScheduleDetail, ScheduleListing};
pub use order::{CreatedOrder, OrderRequest};
