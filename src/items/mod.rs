//! Concrete Data Items (§4.10, §C7): representative positions, altitudes,
//! codes, and identifications, each applying the same three-step pattern —
//! bit-field extraction, integer scaling by a per-field LSB, range
//! validation.

pub mod aircraft_identification;
pub mod data_source_identifier;
pub mod flight_level;
pub mod mode3a_code;
pub mod position;
pub mod quality_indicators;
pub mod reserved_expansion;
pub mod target_address;
pub mod target_report_descriptor;
pub mod time_of_day;
pub mod track_status;
