#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn system_preference_is_light_in_non_hydrate_tests() {
    assert!(!system_prefers_dark());
}

#[test]
fn apply_resolves_explicit_and_system_themes() {
    assert_eq!(apply(Theme::Dark), "dark");
    assert_eq!(apply(Theme::Light), "light");
    assert_eq!(apply(Theme::System), "light");
}

#[test]
fn attribute_value_maps_boolean() {
    assert_eq!(attribute_value(true), "dark");
    assert_eq!(attribute_value(false), "light");
}
