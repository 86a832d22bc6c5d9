//! Representative UAP definitions (§4.4, §9 "data, not design"): one UAP
//! per Category/version this crate ships, built from [`crate::uap::Uap`].
//!
//! These two categories are not exhaustive of the ASTERIX category
//! catalogue — they are chosen to exercise every layout kind end to end:
//! CAT020 (Multilateration Target Reports) covers Fixed and Extended items
//! with an optional mandatory item, CAT021 (ADS-B Target Reports) adds a
//! Compound item and a mandatory Target Address to exercise cross-category
//! validation differences.

use crate::items::{
    aircraft_identification::AircraftIdentification, data_source_identifier::DataSourceIdentifier,
    flight_level::FlightLevel, mode3a_code::Mode3ACode, position::Position,
    quality_indicators::QualityIndicators, reserved_expansion::ReservedExpansion,
    target_address::TargetAddress, target_report_descriptor::TargetReportDescriptor,
    time_of_day::TimeOfDay, track_status::TrackStatus,
};
use crate::uap::{FieldDescriptor, LayoutKind, Uap};
use crate::value::ItemConstructor;
use std::collections::HashMap;

/// CAT020: Multilateration Target Reports.
pub fn cat020() -> Uap {
    let fields = vec![
        FieldDescriptor {
            frn: 1,
            item_id: "I020/010".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: true,
            description: "Data Source Identifier",
        },
        FieldDescriptor {
            frn: 2,
            item_id: "I020/020".into(),
            layout: LayoutKind::Extended,
            mandatory: true,
            description: "Target Report Descriptor",
        },
        FieldDescriptor {
            frn: 3,
            item_id: "I020/140".into(),
            layout: LayoutKind::Fixed { len: 3 },
            mandatory: false,
            description: "Time of Day",
        },
        FieldDescriptor {
            frn: 4,
            item_id: "I020/070".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: false,
            description: "Mode-3/A Code",
        },
        FieldDescriptor {
            frn: 5,
            item_id: "I020/090".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: false,
            description: "Flight Level",
        },
        FieldDescriptor {
            frn: 6,
            item_id: "I020/130".into(),
            layout: LayoutKind::Fixed { len: 6 },
            mandatory: false,
            description: "WGS-84 Position",
        },
        FieldDescriptor {
            frn: 7,
            item_id: "I020/170".into(),
            layout: LayoutKind::Extended,
            mandatory: false,
            description: "Track Status",
        },
        FieldDescriptor {
            frn: 8,
            item_id: "I020/245".into(),
            layout: LayoutKind::Fixed { len: 6 },
            mandatory: false,
            description: "Aircraft Identification",
        },
        FieldDescriptor {
            frn: 9,
            item_id: "RE".into(),
            layout: LayoutKind::Explicit,
            mandatory: false,
            description: "Reserved Expansion Field",
        },
    ];

    let mut factory: HashMap<String, ItemConstructor> = HashMap::new();
    factory.insert("I020/010".into(), || Box::<DataSourceIdentifier>::default());
    factory.insert("I020/020".into(), || Box::<TargetReportDescriptor>::default());
    factory.insert("I020/140".into(), || Box::<TimeOfDay>::default());
    factory.insert("I020/070".into(), || Box::<Mode3ACode>::default());
    factory.insert("I020/090".into(), || Box::<FlightLevel>::default());
    factory.insert("I020/130".into(), || Box::<Position>::default());
    factory.insert("I020/170".into(), || Box::<TrackStatus>::default());
    factory.insert("I020/245".into(), || Box::<AircraftIdentification>::default());
    factory.insert("RE".into(), || Box::<ReservedExpansion>::default());

    Uap::new(20, "1.10", true, fields, factory, None)
}

/// CAT021: ADS-B Target Reports. Shares most item codecs with CAT020 but
/// makes Target Address mandatory and adds the Compound Quality Indicators
/// item (§8 scenario 5 exercises the mandatory-field difference).
pub fn cat021() -> Uap {
    let fields = vec![
        FieldDescriptor {
            frn: 1,
            item_id: "I021/010".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: true,
            description: "Data Source Identifier",
        },
        FieldDescriptor {
            frn: 2,
            item_id: "I021/080".into(),
            layout: LayoutKind::Fixed { len: 3 },
            mandatory: true,
            description: "Target Address",
        },
        FieldDescriptor {
            frn: 3,
            item_id: "I021/073".into(),
            layout: LayoutKind::Fixed { len: 3 },
            mandatory: false,
            description: "Time of Day",
        },
        FieldDescriptor {
            frn: 4,
            item_id: "I021/130".into(),
            layout: LayoutKind::Fixed { len: 6 },
            mandatory: false,
            description: "WGS-84 Position",
        },
        FieldDescriptor {
            frn: 5,
            item_id: "I021/145".into(),
            layout: LayoutKind::Fixed { len: 2 },
            mandatory: false,
            description: "Flight Level",
        },
        FieldDescriptor {
            frn: 6,
            item_id: "I021/170".into(),
            layout: LayoutKind::Fixed { len: 6 },
            mandatory: false,
            description: "Aircraft Identification",
        },
        FieldDescriptor {
            frn: 7,
            item_id: "I021/090".into(),
            layout: LayoutKind::Compound,
            mandatory: false,
            description: "Quality Indicators",
        },
        FieldDescriptor {
            frn: 8,
            item_id: "SP".into(),
            layout: LayoutKind::Explicit,
            mandatory: false,
            description: "Special Purpose Field",
        },
    ];

    let mut factory: HashMap<String, ItemConstructor> = HashMap::new();
    factory.insert("I021/010".into(), || Box::<DataSourceIdentifier>::default());
    factory.insert("I021/080".into(), || Box::<TargetAddress>::default());
    factory.insert("I021/073".into(), || Box::<TimeOfDay>::default());
    factory.insert("I021/130".into(), || Box::<Position>::default());
    factory.insert("I021/145".into(), || Box::<FlightLevel>::default());
    factory.insert("I021/170".into(), || Box::<AircraftIdentification>::default());
    factory.insert("I021/090".into(), || Box::<QualityIndicators>::default());
    factory.insert("SP".into(), || Box::<ReservedExpansion>::default());

    Uap::new(21, "2.1", true, fields, factory, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cat020_fields_are_contiguous_from_one() {
        let uap = cat020();
        for (i, field) in uap.fields().iter().enumerate() {
            assert_eq!(field.frn, (i as u32) + 1);
        }
    }

    #[test]
    fn cat021_target_address_is_mandatory() {
        let uap = cat021();
        let field = uap.field_by_frn(2).unwrap();
        assert_eq!(field.item_id, "I021/080");
        assert!(field.mandatory);
    }
}
