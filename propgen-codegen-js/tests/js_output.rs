use std::fs;

use propgen_codegen::{Emitter, EmitterOptions, SectionFilter};
use propgen_codegen_js::JsEmitter;
use propgen_schema::{SchemaFile, Section};
use tempfile::TempDir;

const SCHEMA: &str = r#"<?xml version="1.0"?>
<properties>
  <class name="proxy" prefix-only="false">
    <suffix name="Locator" />
    <suffix name="Router" deprecatedBy="Routers" />
  </class>
  <section name="Ice">
    <property name="Default.Locator" class="proxy" />
    <property name="Admin.[any]" />
    <property name="ThreadPool.Server" deprecated="true" />
  </section>
  <section name="IceBox" noCmdLine="true">
    <property name="ServiceManager.Endpoints" />
  </section>
</properties>
"#;

fn generate(xml: &str, configure: impl FnOnce(EmitterOptions) -> EmitterOptions) -> String {
    let temp = TempDir::new().unwrap();
    let schema = SchemaFile::from_source("PropertyNames.xml", xml).unwrap();
    let classes = schema.classes().unwrap();
    let options = JsEmitter::default_options(schema.class_name(), &schema.file_name())
        .with_staging_dir(temp.path());
    let mut js = JsEmitter::new(configure(options));

    js.start_files().unwrap();
    for event in schema.events(&classes) {
        js.dispatch(&event.unwrap()).unwrap();
    }

    fs::read_to_string(temp.path().join("PropertyNames.js")).unwrap()
}

#[test]
fn test_js_file_with_default_sections() {
    insta::assert_snapshot!(generate(SCHEMA, |o| o), @r#"
    // Generated by propgen from file PropertyNames.xml
    //
    // IMPORTANT: Do not edit this file -- any edits made here will be lost!

    (function(global){
        var Ice = global.Ice || Ice;
        require("Ice/Property");
        var PropertyNames = {};
        var Property = Ice.Property;
        /* jshint -W044*/

        PropertyNames.IceProps =
        [
            new Property("/^Ice\.Default\.Locator\.Locator/", false, null),
            new Property("/^Ice\.Default\.Locator\.Router/", true, "Ice.Default.Locator.Routers"),
            new Property("/^Ice\.Default\.Locator/", false, null),
            new Property("/^Ice\.Admin\../", false, null),
            new Property("/^Ice\.ThreadPool\.Server/", true, null),
        ];

        /* jshint +W044*/

        PropertyNames.validProps =
        [
            PropertyNames.IceProps,
        ];

        PropertyNames.clPropNames =
        [
            "Ice",
        ];

        Ice.PropertyNames = PropertyNames;
        global.Ice = Ice;
    }(typeof (global) === "undefined" ? window : global));
    "#);
}

#[test]
fn test_selective_over_other_section() {
    let xml = r#"<properties>
      <section name="Ice"><property name="Trace" /></section>
      <section name="Other"><property name="Hidden" /></section>
    </properties>"#;

    let js = generate(xml, |o| o);

    assert!(js.contains("PropertyNames.IceProps =\n"));
    assert!(!js.contains("OtherProps"));
    assert!(!js.contains("Hidden"));
    assert!(!js.contains("\"Other\""));
}

#[test]
fn test_allow_list_override() {
    let js = generate(SCHEMA, |o| o.with_sections(SectionFilter::All));

    assert!(js.contains("PropertyNames.IceBoxProps =\n"));
    assert!(js.contains("        PropertyNames.IceBoxProps,\n"));
    // noCmdLine still applies.
    assert!(!js.contains("        \"IceBox\",\n"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    assert_eq!(generate(SCHEMA, |o| o), generate(SCHEMA, |o| o));
}

#[test]
fn test_cleanup_removes_partial_output() {
    let temp = TempDir::new().unwrap();
    let mut js = JsEmitter::new(
        JsEmitter::default_options("PropertyNames", "PropertyNames.xml")
            .with_staging_dir(temp.path()),
    );
    js.start_files().unwrap();
    js.new_section(&Section::new("Ice", true)).unwrap();

    js.cleanup().unwrap();

    assert!(!temp.path().join("PropertyNames.js").exists());
}
