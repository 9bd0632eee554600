mod reading;
mod sensor_location;

pub use reading::{Metric, Reading, ReadingTable};
pub use sensor_location::{SensorLocation, SensorLocationTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;
}
