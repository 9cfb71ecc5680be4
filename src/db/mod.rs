//! Database layer (MongoDB).

pub mod convert;
pub mod memory;
pub mod mongo;
pub mod results;

pub use memory::MemoryStore;
pub use mongo::MongoDb;
pub use results::{DeleteOutcome, InsertOutcome, UpdateOutcome};

/// Collection names as constants.
pub mod collections {
    pub const ROOMS: &str = "rooms";
    pub const BOOKINGS: &str = "bookings";
    pub const USERS: &str = "users";
}

/// Document field names shared by handlers and the storage layer.
pub mod fields {
    pub const ID: &str = "_id";
    pub const EMAIL: &str = "email";
    /// Room availability, overwritten wholesale on update.
    pub const AVAILABILITY: &str = "Availability";
    pub const BOOKED_DATE: &str = "bookedDate";
}
