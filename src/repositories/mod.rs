mod reading;
mod sensor_location;

pub use reading::{MonthlyGroup, ReadingRepository};
pub use sensor_location::{NewSensorLocation, SensorLocationRepository};
