use linkable::domain::registry::TypeRegistry;
use linkable::infrastructure::i18n::NullTranslator;
use linkable::prelude::*;
use std::sync::Arc;

// Installing is once per process, so this file holds a single test.
#[test]
fn test_registry_installs_once() {
    assert!(TypeRegistry::global().is_none());

    let registry = TypeRegistry::builder()
        .with_style("button", "Button")
        .with_translator(Arc::new(NullTranslator::new()))
        .build()
        .unwrap();
    let installed = registry.install().unwrap();

    let global = TypeRegistry::global().unwrap();
    assert!(Arc::ptr_eq(&installed, &global));
    assert_eq!(
        global.i18n_styles(),
        vec![("button".to_string(), "Button".to_string())]
    );

    let err = TypeRegistry::default().install().unwrap_err();
    assert!(matches!(err, LinkError::Configuration { .. }));
}
