pub mod activities;
pub mod activity;
pub mod contact;
pub mod debug;
pub mod home;
pub mod submit;
pub mod waitlist;
