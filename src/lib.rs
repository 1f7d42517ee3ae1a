pub mod auto_off;
pub mod config;
pub mod controller;
pub mod error;
pub mod posture;
pub mod relay_wapper;
pub mod schedule;
pub mod sensor;
pub mod std_clock;
