mod firmware_handle;
mod location_handle;
mod reading_handle;

pub use firmware_handle::*;
pub use location_handle::*;
pub use reading_handle::*;
