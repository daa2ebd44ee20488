pub mod anomalies;
pub mod forecast;
pub mod ghost;
pub mod sessions;
