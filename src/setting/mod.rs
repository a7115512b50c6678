//! Per-type settings registry and the assignment engine.

pub mod assignment;
pub mod registry;

pub use assignment::{
    assign_attribute, assign_object, is_assignable, is_registered_setting,
};
pub use registry::{Settable, SettingEntry, SettingTable};
