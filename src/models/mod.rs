pub mod activity;
pub mod waitlist;

pub use activity::Activity;
pub use waitlist::WaitlistEntry;
