pub mod lat_lon;
pub mod observation;
pub mod record_set;
pub mod target;
pub mod traits;
pub mod view;
