//! Integration tests for the object protocol
//!
//! Tests deflate/inflate inversion, factory registration, and the one-time
//! proxy upgrade on typed access.

use std::any::Any;

use vellum_foundation::{
    Dictionary, ErrorKind, ObjectData, ObjectFactory, ObjectProxy, Result, Variant, VariantObject,
};

#[derive(Debug, Default, PartialEq)]
struct Sensor {
    label: String,
    threshold: f64,
}

impl VariantObject for Sensor {
    fn class_name(&self) -> &str {
        "Sensor"
    }

    fn version(&self) -> i32 {
        2
    }

    fn deflate(&self) -> Variant {
        let mut params = Dictionary::new();
        params.insert("label", Variant::String(self.label.clone()));
        params.insert("threshold", Variant::Double(self.threshold));
        Variant::Dictionary(params)
    }

    fn inflate(&mut self, params: Variant, version: i32) -> Result<()> {
        // Version 1 stored only the label.
        self.label = params.get_key("label")?.get::<String>()?;
        self.threshold = if version >= 2 {
            params.get_key("threshold")?.get::<f64>()?
        } else {
            0.0
        };
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Default)]
struct Other;

impl VariantObject for Other {
    fn class_name(&self) -> &str {
        "Other"
    }

    fn version(&self) -> i32 {
        1
    }

    fn deflate(&self) -> Variant {
        Variant::None
    }

    fn inflate(&mut self, _params: Variant, _version: i32) -> Result<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn sensor() -> Sensor {
    Sensor {
        label: "intake".to_string(),
        threshold: 0.75,
    }
}

#[test]
fn inflate_inverts_deflate() {
    let params = sensor().deflate();
    let mut restored = Sensor::default();
    restored.inflate(params, 2).unwrap();
    assert_eq!(restored, sensor());
}

#[test]
fn old_versions_are_migrated_by_the_type() {
    let mut params = Dictionary::new();
    params.insert("label", Variant::String("legacy".to_string()));
    let mut restored = Sensor::default();
    restored.inflate(Variant::Dictionary(params), 1).unwrap();
    assert_eq!(restored.label, "legacy");
    assert_eq!(restored.threshold, 0.0);
}

#[test]
fn factory_resolves_by_class_name() {
    let mut factory = ObjectFactory::new();
    factory.register::<Sensor>();
    factory.register::<Other>();
    assert!(factory.create("Sensor").is_some());
    assert!(factory.create("Sensor").unwrap().as_any().is::<Sensor>());
    assert!(factory.create("Thermostat").is_none());
}

#[test]
fn typed_access_hits_the_instance() {
    let mut value = Variant::Object(ObjectData::typed(sensor()));
    let seen: &Sensor = value.as_object().unwrap();
    assert_eq!(seen.threshold, 0.75);
}

#[test]
fn proxy_upgrades_in_place_on_typed_access() {
    let proxy = ObjectProxy {
        class_name: "Sensor".to_string(),
        version: 2,
        params: Box::new(sensor().deflate()),
    };
    let mut value = Variant::Object(ObjectData::Proxy(proxy));
    {
        let seen: &Sensor = value.as_object().unwrap();
        assert_eq!(seen.label, "intake");
    }
    // The payload is now typed; the upgrade happened once.
    let Variant::Object(data) = &value else {
        panic!("expected an object");
    };
    assert!(!data.is_proxy());
}

#[test]
fn class_mismatch_is_rejected() {
    let proxy = ObjectProxy {
        class_name: "Sensor".to_string(),
        version: 2,
        params: Box::new(sensor().deflate()),
    };
    let mut value = Variant::Object(ObjectData::Proxy(proxy));
    let err = value.as_object::<Other>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    let message = format!("{err}");
    assert!(message.contains("Sensor"));
    assert!(message.contains("Other"));
    // A failed request leaves the proxy untouched.
    let Variant::Object(data) = &value else {
        panic!("expected an object");
    };
    assert!(data.is_proxy());

    // The same contract holds once the payload is typed.
    let mut typed = Variant::Object(ObjectData::typed(sensor()));
    let err = typed.as_object::<Other>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert!(format!("{err}").contains("Sensor"));
}

#[test]
fn proxy_preserves_unknown_state() {
    let params = sensor().deflate();
    let data = ObjectData::Proxy(ObjectProxy {
        class_name: "Retired".to_string(),
        version: 9,
        params: Box::new(params.clone()),
    });
    assert_eq!(data.class_name(), "Retired");
    assert_eq!(data.version(), 9);
    assert_eq!(data.deflate(), params);
}
