//! Unit tests for component classification and spec extraction

use super::*;
use proptest::prelude::*;
use tsci_core::types::{ComponentMetadata, PackageLinks, RegistryPackage};

fn details(name: &str, description: &str, keywords: &[&str]) -> PackageDetails {
    PackageDetails::from_package(RegistryPackage {
        name: name.to_string(),
        version: "1.0.0".to_string(),
        description: description.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        links: PackageLinks {
            npm: format!("https://www.npmjs.com/package/@tsci/{}", name),
            homepage: None,
            repository: None,
        },
        author: None,
        license: None,
        dependencies: None,
        dev_dependencies: None,
        tscircuit: None,
    })
}

fn tagged(name: &str, category: &str) -> PackageDetails {
    let mut pkg = details(name, "", &[]);
    pkg.package.tscircuit = Some(ComponentMetadata {
        kind: "component".to_string(),
        category: Some(category.to_string()),
        footprint: None,
        specifications: None,
    });
    pkg
}

#[test]
fn test_led_driver_classifies_as_led() {
    let pkg = details("seveibar/led-driver", "SOT-23 3.3V LED driver", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Led);
}

#[test]
fn test_ic_precedes_led() {
    let pkg = details("acme/led-ic-driver", "", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Ic);

    let pkg = details("acme/driver", "LED driver integrated circuit", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Ic);
}

#[test]
fn test_ic_not_matched_inside_description_words() {
    let pkg = details("acme/red-led", "Basic red LED", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Led);

    let pkg = details("acme/hall", "Magnetic field sensor", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Sensor);
}

#[test]
fn test_first_category_in_order_wins() {
    // Mentions both a resistor and a capacitor; resistor comes first
    let pkg = details("acme/rc-filter", "capacitor and resistor network", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Resistor);
}

#[test]
fn test_keyword_match_is_case_insensitive() {
    let pkg = details("acme/x1", "", &["Crystal"]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Crystal);
}

#[test]
fn test_description_and_name_matching() {
    assert_eq!(
        infer_category(&details("acme/part", "Tactile SWITCH, 6mm", &[])),
        ComponentCategory::Switch
    );
    assert_eq!(infer_category(&details("acme/usb-antenna", "", &[])), ComponentCategory::Antenna);
}

#[test]
fn test_no_signal_is_other() {
    let pkg = details("acme/widget", "A thing", &[]);
    assert_eq!(infer_category(&pkg), ComponentCategory::Other);
}

#[test]
fn test_explicit_tag_is_trusted() {
    // The name alone would classify as led
    assert_eq!(infer_category(&tagged("seveibar/red-led", "sensor")), ComponentCategory::Sensor);
    assert_eq!(infer_category(&tagged("seveibar/red-led", "Relay")), ComponentCategory::Relay);
}

#[test]
fn test_unknown_tag_is_other() {
    assert_eq!(infer_category(&tagged("seveibar/red-led", "gizmo")), ComponentCategory::Other);
}

#[test]
fn test_extract_voltage_and_footprint() {
    let specs = extract_specs("SOT-23 3.3V LED driver", &[]);

    assert_eq!(specs.get("voltage"), Some(&SpecValue::Number(3.3)));
    assert_eq!(specs.get("footprint"), Some(&SpecValue::Text("SOT-23".to_string())));
    assert!(!specs.contains_key("current"));
    assert!(!specs.contains_key("capacitance"));
}

#[test]
fn test_extract_capacitor_specs() {
    let specs = extract_specs("100nF ceramic capacitor 16V", &["0805".to_string()]);

    assert_eq!(specs.get("capacitance"), Some(&SpecValue::Number(100.0)));
    assert_eq!(specs.get("voltage"), Some(&SpecValue::Number(16.0)));
    assert_eq!(specs.get("footprint"), Some(&SpecValue::Text("0805".to_string())));
    assert!(!specs.contains_key("resistance"));
}

#[test]
fn test_extract_resistance_units() {
    let specs = extract_specs("10k resistor", &[]);
    assert_eq!(specs.get("resistance"), Some(&SpecValue::Number(10.0)));

    let specs = extract_specs("220Ω pull-down", &[]);
    assert_eq!(specs.get("resistance"), Some(&SpecValue::Number(220.0)));

    let specs = extract_specs("47 ohm", &[]);
    assert_eq!(specs.get("resistance"), Some(&SpecValue::Number(47.0)));
}

#[test]
fn test_extract_keeps_raw_number_without_unit_scaling() {
    // 500mA is read as current 500 and, with no unit disambiguation, resistance 500
    let specs = extract_specs("Regulator rated 500mA", &[]);
    assert_eq!(specs.get("current"), Some(&SpecValue::Number(500.0)));
    assert_eq!(specs.get("resistance"), Some(&SpecValue::Number(500.0)));
}

#[test]
fn test_extract_first_match_only() {
    let specs = extract_specs("5V input, 12V output", &[]);
    assert_eq!(specs.get("voltage"), Some(&SpecValue::Number(5.0)));
}

#[test]
fn test_extract_reads_ascii_digits_only() {
    let specs = extract_specs("\u{663}v then 5v", &[]);
    assert_eq!(specs.get("voltage"), Some(&SpecValue::Number(5.0)));

    let specs = extract_specs("\u{967}\u{966}k pull-up", &[]);
    assert_eq!(specs.get("resistance"), None);
}

#[test]
fn test_extract_reads_keywords() {
    let specs = extract_specs("", &["5v".to_string(), "tssop".to_string()]);
    assert_eq!(specs.get("voltage"), Some(&SpecValue::Number(5.0)));
    assert_eq!(specs.get("footprint"), Some(&SpecValue::Text("TSSOP".to_string())));
}

#[test]
fn test_extract_nothing() {
    assert!(extract_specs("A plain widget", &[]).is_empty());
    assert!(extract_specs("", &[]).is_empty());
}

proptest! {
    #[test]
    fn prop_extraction_never_panics_and_footprints_are_upper_case(text in "\\PC{0,64}") {
        let specs = extract_specs(&text, &[]);
        if let Some(SpecValue::Text(code)) = specs.get("footprint") {
            prop_assert_eq!(code.clone(), code.to_uppercase());
        }
        for (label, value) in &specs {
            if label != "footprint" {
                prop_assert!(value.as_f64().map(|n| n.is_finite()).unwrap_or(false));
            }
        }
    }
}
