pub mod activities_service;
pub mod contact_service;
pub mod debug_service;
pub mod waitlist_service;
